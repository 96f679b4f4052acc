//! Menu item translation repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::MenuItemTranslation;
use crate::error::DomainError;

/// Uniqueness of `(item, locale)` is enforced by the store: of two concurrent
/// creates for the same pair, exactly one wins and the loser gets
/// `TranslationAlreadyExists`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemTranslationRepository: Send + Sync {
    async fn find_by_item_and_locale(
        &self,
        item_id: &Uuid,
        locale_id: &Uuid,
    ) -> Result<Option<MenuItemTranslation>, DomainError>;

    async fn list_by_item(&self, item_id: &Uuid) -> Result<Vec<MenuItemTranslation>, DomainError>;

    async fn create(
        &self,
        translation: &MenuItemTranslation,
    ) -> Result<MenuItemTranslation, DomainError>;

    async fn update(
        &self,
        translation: &MenuItemTranslation,
    ) -> Result<MenuItemTranslation, DomainError>;

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;

    /// Remove every translation of an item (used when the item is deleted).
    async fn delete_by_item(&self, item_id: &Uuid) -> Result<(), DomainError>;
}
