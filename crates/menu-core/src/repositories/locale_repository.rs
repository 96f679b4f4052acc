//! Locale repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Locale;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocaleRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Locale>, DomainError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Locale>, DomainError>;
}
