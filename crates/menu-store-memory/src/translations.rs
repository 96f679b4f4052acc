// ============================================================================
// Menu Store - Menu Item Translation Repository
// File: crates/menu-store-memory/src/translations.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use menu_core::domain::MenuItemTranslation;
use menu_core::error::DomainError;
use menu_core::repositories::MenuItemTranslationRepository;

#[derive(Default)]
pub struct MemoryTranslationStore {
    translations: RwLock<HashMap<Uuid, MenuItemTranslation>>,
}

impl MemoryTranslationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuItemTranslationRepository for MemoryTranslationStore {
    async fn find_by_item_and_locale(
        &self,
        item_id: &Uuid,
        locale_id: &Uuid,
    ) -> Result<Option<MenuItemTranslation>, DomainError> {
        Ok(self
            .translations
            .read()
            .await
            .values()
            .find(|t| t.item_id == *item_id && t.locale_id == *locale_id)
            .cloned())
    }

    async fn list_by_item(&self, item_id: &Uuid) -> Result<Vec<MenuItemTranslation>, DomainError> {
        let translations = self.translations.read().await;
        let mut selected: Vec<MenuItemTranslation> = translations
            .values()
            .filter(|t| t.item_id == *item_id)
            .cloned()
            .collect();
        selected.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(selected)
    }

    async fn create(
        &self,
        translation: &MenuItemTranslation,
    ) -> Result<MenuItemTranslation, DomainError> {
        // The uniqueness check and the insert share one write lock: of two
        // racing creates for the same (item, locale), exactly one wins.
        let mut translations = self.translations.write().await;
        if translations
            .values()
            .any(|t| t.item_id == translation.item_id && t.locale_id == translation.locale_id)
        {
            return Err(DomainError::TranslationAlreadyExists {
                item_id: translation.item_id,
                locale_id: translation.locale_id,
            });
        }
        translations.insert(translation.id, translation.clone());
        Ok(translation.clone())
    }

    async fn update(
        &self,
        translation: &MenuItemTranslation,
    ) -> Result<MenuItemTranslation, DomainError> {
        let mut translations = self.translations.write().await;
        if !translations.contains_key(&translation.id) {
            return Err(DomainError::not_found(
                "translation",
                translation.id.to_string(),
            ));
        }
        translations.insert(translation.id, translation.clone());
        Ok(translation.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.translations.write().await.remove(id);
        Ok(())
    }

    async fn delete_by_item(&self, item_id: &Uuid) -> Result<(), DomainError> {
        self.translations
            .write()
            .await
            .retain(|_, t| t.item_id != *item_id);
        Ok(())
    }
}
