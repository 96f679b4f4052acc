//! Menu usage resolver trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::UsageBinding;
use crate::error::DomainError;

/// Reports active theme/location bindings for a menu; a non-empty answer
/// blocks menu deletion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuUsageResolver: Send + Sync {
    async fn active_bindings(&self, menu_id: &Uuid) -> Result<Vec<UsageBinding>, DomainError>;
}

/// Null object: no theme integration, nothing is ever in use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActiveUsage;

#[async_trait]
impl MenuUsageResolver for NoActiveUsage {
    async fn active_bindings(&self, _menu_id: &Uuid) -> Result<Vec<UsageBinding>, DomainError> {
        Ok(Vec::new())
    }
}
