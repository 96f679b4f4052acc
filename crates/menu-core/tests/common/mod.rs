//! Shared fixtures: a menu service wired to the in-memory stores.

use std::sync::Arc;

use menu_core::domain::{Locale, Page};
use menu_core::{MenuService, MenuServiceConfig};
use menu_store_memory::{
    MemoryActivitySink, MemoryLocaleStore, MemoryMenuItemStore, MemoryMenuStore, MemoryPageStore,
    MemoryTranslationStore,
};

pub struct TestEnv {
    pub service: MenuService,
    pub items: Arc<MemoryMenuItemStore>,
    pub translations: Arc<MemoryTranslationStore>,
    pub locales: Arc<MemoryLocaleStore>,
    pub pages: Arc<MemoryPageStore>,
    pub activity: Arc<MemoryActivitySink>,
}

/// Service over fresh stores, seeded with the `en`/`fr` locales and a few
/// pages menu targets can point at.
pub async fn env_with(config: MenuServiceConfig) -> TestEnv {
    let menus = Arc::new(MemoryMenuStore::new());
    let items = Arc::new(MemoryMenuItemStore::new());
    let translations = Arc::new(MemoryTranslationStore::new());
    let locales = Arc::new(MemoryLocaleStore::new());
    let pages = Arc::new(MemoryPageStore::new());
    let activity = Arc::new(MemoryActivitySink::new());

    locales.insert(Locale::new("en")).await;
    locales.insert(Locale::new("fr")).await;

    pages.insert(Page::new("home").with_default_path("/")).await;
    pages
        .insert(Page::new("about").with_default_path("/about"))
        .await;
    pages
        .insert(
            Page::new("team")
                .with_default_path("/team")
                .with_path("fr", "/fr/equipe"),
        )
        .await;

    let service = MenuService::builder(
        menus,
        items.clone(),
        translations.clone(),
        locales.clone(),
        pages.clone(),
    )
    .activity_emitter(activity.clone())
    .config(config)
    .build();

    TestEnv {
        service,
        items,
        translations,
        locales,
        pages,
        activity,
    }
}

pub async fn env() -> TestEnv {
    env_with(MenuServiceConfig::default()).await
}

/// A `{type: "page", slug}` target payload.
pub fn page_target(slug: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert("type".to_string(), serde_json::Value::String("page".to_string()));
    map.insert("slug".to_string(), serde_json::Value::String(slug.to_string()));
    map
}
