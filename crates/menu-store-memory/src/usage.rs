// ============================================================================
// Menu Store - Usage Resolver
// File: crates/menu-store-memory/src/usage.rs
// ============================================================================

use async_trait::async_trait;
use uuid::Uuid;

use menu_core::domain::UsageBinding;
use menu_core::error::DomainError;
use menu_core::repositories::MenuUsageResolver;

/// Reports a fixed set of bindings for every menu. Useful where theme
/// integration is static, and for exercising the delete guard rail.
#[derive(Default)]
pub struct StaticUsageResolver {
    bindings: Vec<UsageBinding>,
}

impl StaticUsageResolver {
    pub fn new(bindings: Vec<UsageBinding>) -> Self {
        Self { bindings }
    }
}

#[async_trait]
impl MenuUsageResolver for StaticUsageResolver {
    async fn active_bindings(&self, _menu_id: &Uuid) -> Result<Vec<UsageBinding>, DomainError> {
        Ok(self.bindings.clone())
    }
}
