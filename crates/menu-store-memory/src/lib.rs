//! # Menu Store (in-memory)
//!
//! In-process implementations of the `menu-core` repository ports, backed by
//! `RwLock`-protected maps. The store-side uniqueness rules the service
//! delegates downward (unique menu code, unique `(item, locale)` translation)
//! are enforced here under the write lock, so concurrent writers observe the
//! same winner-takes-it semantics a SQL unique index would give.

pub mod activity;
pub mod items;
pub mod locales;
pub mod menus;
pub mod pages;
pub mod translations;
pub mod usage;

pub use activity::MemoryActivitySink;
pub use items::MemoryMenuItemStore;
pub use locales::MemoryLocaleStore;
pub use menus::MemoryMenuStore;
pub use pages::MemoryPageStore;
pub use translations::MemoryTranslationStore;
pub use usage::StaticUsageResolver;
