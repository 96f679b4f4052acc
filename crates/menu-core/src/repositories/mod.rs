//! Repository traits (ports)

pub mod locale_repository;
pub mod menu_item_repository;
pub mod menu_repository;
pub mod page_repository;
pub mod translation_repository;
pub mod usage_resolver;

pub use locale_repository::LocaleRepository;
pub use menu_item_repository::{BulkHierarchyWriter, HierarchyPlacement, MenuItemRepository};
pub use menu_repository::MenuRepository;
pub use page_repository::PageRepository;
pub use translation_repository::MenuItemTranslationRepository;
pub use usage_resolver::{MenuUsageResolver, NoActiveUsage};
