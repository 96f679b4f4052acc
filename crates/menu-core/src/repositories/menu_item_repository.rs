//! Menu item repository trait (port), plus the optional bulk-write capability

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{MenuItem, ParentLink};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError>;

    /// All items of a menu, in stored order.
    async fn list_by_menu(&self, menu_id: &Uuid) -> Result<Vec<MenuItem>, DomainError>;

    /// Items sharing a resolved parent (`None` for root siblings). Items with
    /// a pending parent reference belong to no sibling group and are never
    /// returned here.
    async fn list_children<'a>(
        &self,
        menu_id: &Uuid,
        parent_id: Option<&'a Uuid>,
    ) -> Result<Vec<MenuItem>, DomainError>;

    async fn find_by_canonical_key(
        &self,
        menu_id: &Uuid,
        key: &str,
    ) -> Result<Option<MenuItem>, DomainError>;

    async fn find_by_external_code(
        &self,
        menu_id: &Uuid,
        code: &str,
    ) -> Result<Option<MenuItem>, DomainError>;

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}

/// One parent/position assignment of a bulk hierarchy write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyPlacement {
    pub item_id: Uuid,
    pub parent: ParentLink,
    pub position: i32,
}

/// Optional store capability: apply a batch of parent/position assignments in
/// one write. When a store does not provide it, the service falls back to
/// sequential per-item updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BulkHierarchyWriter: Send + Sync {
    async fn apply_placements(
        &self,
        menu_id: &Uuid,
        placements: &[HierarchyPlacement],
    ) -> Result<(), DomainError>;
}
