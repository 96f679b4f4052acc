// ============================================================================
// Menu Store - Locale Repository
// File: crates/menu-store-memory/src/locales.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use menu_core::domain::Locale;
use menu_core::error::DomainError;
use menu_core::repositories::LocaleRepository;

#[derive(Default)]
pub struct MemoryLocaleStore {
    locales: RwLock<HashMap<Uuid, Locale>>,
}

impl MemoryLocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a locale and returns it (fixture helper).
    pub async fn insert(&self, locale: Locale) -> Locale {
        self.locales.write().await.insert(locale.id, locale.clone());
        locale
    }
}

#[async_trait]
impl LocaleRepository for MemoryLocaleStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Locale>, DomainError> {
        Ok(self.locales.read().await.get(id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Locale>, DomainError> {
        Ok(self
            .locales
            .read()
            .await
            .values()
            .find(|l| l.code.eq_ignore_ascii_case(code))
            .cloned())
    }
}
