// ============================================================================
// Menu Store - Menu Repository
// File: crates/menu-store-memory/src/menus.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use menu_core::domain::Menu;
use menu_core::error::DomainError;
use menu_core::repositories::MenuRepository;

#[derive(Default)]
pub struct MemoryMenuStore {
    menus: RwLock<HashMap<Uuid, Menu>>,
}

impl MemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for MemoryMenuStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
        Ok(self.menus.read().await.get(id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Menu>, DomainError> {
        Ok(self
            .menus
            .read()
            .await
            .values()
            .find(|m| m.code == code)
            .cloned())
    }

    async fn find_by_location(&self, location: &str) -> Result<Option<Menu>, DomainError> {
        let menus = self.menus.read().await;
        let mut bound: Vec<&Menu> = menus
            .values()
            .filter(|m| m.location.as_deref() == Some(location))
            .collect();
        bound.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(bound.first().map(|m| (*m).clone()))
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let mut menus = self.menus.write().await;
        if menus.values().any(|m| m.code == menu.code) {
            return Err(DomainError::MenuCodeAlreadyExists(menu.code.clone()));
        }
        if menus.contains_key(&menu.id) {
            return Err(DomainError::StorageError(format!(
                "duplicate menu id {}",
                menu.id
            )));
        }
        menus.insert(menu.id, menu.clone());
        Ok(menu.clone())
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let mut menus = self.menus.write().await;
        if !menus.contains_key(&menu.id) {
            return Err(DomainError::not_found("menu", menu.id.to_string()));
        }
        if menus
            .values()
            .any(|m| m.id != menu.id && m.code == menu.code)
        {
            return Err(DomainError::MenuCodeAlreadyExists(menu.code.clone()));
        }
        menus.insert(menu.id, menu.clone());
        Ok(menu.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.menus.write().await.remove(id);
        Ok(())
    }
}
