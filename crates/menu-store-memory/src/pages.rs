// ============================================================================
// Menu Store - Page Repository
// File: crates/menu-store-memory/src/pages.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use menu_core::domain::Page;
use menu_core::error::DomainError;
use menu_core::repositories::PageRepository;

#[derive(Default)]
pub struct MemoryPageStore {
    pages: RwLock<HashMap<Uuid, Page>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page and returns it (fixture helper).
    pub async fn insert(&self, page: Page) -> Page {
        self.pages.write().await.insert(page.id, page.clone());
        page
    }
}

#[async_trait]
impl PageRepository for MemoryPageStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Page>, DomainError> {
        Ok(self.pages.read().await.get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DomainError> {
        Ok(self
            .pages
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }
}
