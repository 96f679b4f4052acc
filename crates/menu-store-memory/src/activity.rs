// ============================================================================
// Menu Store - Activity Sink
// File: crates/menu-store-memory/src/activity.rs
// ============================================================================

use async_trait::async_trait;
use tokio::sync::RwLock;

use menu_core::activity::{ActivityEmitter, ActivityEvent};
use menu_core::error::DomainError;

/// Captures emitted events in memory; handy for assertions and audits in
/// embedded setups.
#[derive(Default)]
pub struct MemoryActivitySink {
    events: RwLock<Vec<ActivityEvent>>,
}

impl MemoryActivitySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<ActivityEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl ActivityEmitter for MemoryActivitySink {
    async fn record(&self, event: ActivityEvent) -> Result<(), DomainError> {
        self.events.write().await.push(event);
        Ok(())
    }
}
