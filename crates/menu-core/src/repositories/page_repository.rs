//! Page repository trait (port)
//!
//! Used for page-target validation and as the URL fallback source.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Page;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Page>, DomainError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Page>, DomainError>;
}
