// ============================================================================
// Menu Core - Activity Events
// File: crates/menu-core/src/activity.rs
// Description: Fire-and-forget domain event sink
// ============================================================================

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::error::DomainError;
use crate::reconcile::ReconcileReport;

/// Domain event emitted after a successful mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    MenuCreated { menu_id: Uuid, code: String },
    MenuUpdated { menu_id: Uuid },
    MenuDeleted { menu_id: Uuid, code: String },
    ItemAdded { menu_id: Uuid, item_id: Uuid },
    /// A dedupe hit: the add call merged into an existing item.
    ItemMerged { menu_id: Uuid, item_id: Uuid, merged_locales: usize },
    ItemUpdated { menu_id: Uuid, item_id: Uuid },
    ItemDeleted { menu_id: Uuid, item_id: Uuid, cascaded: usize },
    ItemsReordered { menu_id: Uuid, changed: usize },
    TranslationAdded { item_id: Uuid, locale_id: Uuid },
    TranslationUpdated { item_id: Uuid, locale_id: Uuid },
    MenuReconciled { menu_id: Uuid, report: ReconcileReport },
}

/// Sink for domain events. Failures never fail the primary operation; the
/// service logs and moves on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityEmitter: Send + Sync {
    async fn record(&self, event: ActivityEvent) -> Result<(), DomainError>;
}

/// Null object: activity recording disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopActivityEmitter;

#[async_trait]
impl ActivityEmitter for NoopActivityEmitter {
    async fn record(&self, _event: ActivityEvent) -> Result<(), DomainError> {
        Ok(())
    }
}
