//! Domain entities for the menu engine.

pub mod locale;
pub mod menu;
pub mod menu_item;
pub mod navigation;
pub mod page;
pub mod translation;
pub mod usage;

// Re-export all entities and enums
pub use locale::Locale;
pub use menu::Menu;
pub use menu_item::{MenuItem, MenuItemType, ParentLink};
pub use navigation::NavigationNode;
pub use page::Page;
pub use translation::MenuItemTranslation;
pub use usage::UsageBinding;
