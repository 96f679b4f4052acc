// ============================================================================
// Menu Store - Menu Item Repository
// File: crates/menu-store-memory/src/items.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use menu_core::domain::{MenuItem, ParentLink};
use menu_core::error::DomainError;
use menu_core::repositories::{BulkHierarchyWriter, HierarchyPlacement, MenuItemRepository};

#[derive(Default)]
pub struct MemoryMenuItemStore {
    items: RwLock<HashMap<Uuid, MenuItem>>,
}

impl MemoryMenuItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_creation(mut items: Vec<MenuItem>) -> Vec<MenuItem> {
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    items
}

fn sorted_by_position(mut items: Vec<MenuItem>) -> Vec<MenuItem> {
    items.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    items
}

#[async_trait]
impl MenuItemRepository for MemoryMenuItemStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn list_by_menu(&self, menu_id: &Uuid) -> Result<Vec<MenuItem>, DomainError> {
        let items = self.items.read().await;
        Ok(sorted_by_creation(
            items
                .values()
                .filter(|it| it.menu_id == *menu_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_children<'a>(
        &self,
        menu_id: &Uuid,
        parent_id: Option<&'a Uuid>,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let items = self.items.read().await;
        let selected = items
            .values()
            .filter(|it| it.menu_id == *menu_id)
            .filter(|it| match (parent_id, &it.parent) {
                (None, ParentLink::Root) => true,
                (Some(pid), ParentLink::Resolved(actual)) => actual == pid,
                _ => false,
            })
            .cloned()
            .collect();
        Ok(sorted_by_position(selected))
    }

    async fn find_by_canonical_key(
        &self,
        menu_id: &Uuid,
        key: &str,
    ) -> Result<Option<MenuItem>, DomainError> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .find(|it| it.menu_id == *menu_id && it.canonical_key.as_deref() == Some(key))
            .cloned())
    }

    async fn find_by_external_code(
        &self,
        menu_id: &Uuid,
        code: &str,
    ) -> Result<Option<MenuItem>, DomainError> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .find(|it| {
                it.menu_id == *menu_id
                    && it
                        .external_code
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(code))
            })
            .cloned())
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(DomainError::StorageError(format!(
                "duplicate item id {}",
                item.id
            )));
        }
        items.insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn update(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        let mut items = self.items.write().await;
        if !items.contains_key(&item.id) {
            return Err(DomainError::not_found("menu item", item.id.to_string()));
        }
        items.insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.items.write().await.remove(id);
        Ok(())
    }
}

/// Optional capability: the whole placement batch lands under one write
/// lock, so readers never observe a half-applied reorder.
#[async_trait]
impl BulkHierarchyWriter for MemoryMenuItemStore {
    async fn apply_placements(
        &self,
        _menu_id: &Uuid,
        placements: &[HierarchyPlacement],
    ) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        for placement in placements {
            let Some(item) = items.get_mut(&placement.item_id) else {
                return Err(DomainError::not_found(
                    "menu item",
                    placement.item_id.to_string(),
                ));
            };
            item.parent = placement.parent.clone();
            item.position = placement.position;
        }
        Ok(())
    }
}
