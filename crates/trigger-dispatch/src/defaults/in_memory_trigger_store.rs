//! In-memory trigger store for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StorageError;
use crate::traits::TriggerStore;
use crate::types::TriggerDefinition;

/// Trigger definitions keyed by event name, behind an `RwLock`.
pub struct InMemoryTriggerStore {
    triggers: RwLock<HashMap<String, Vec<TriggerDefinition>>>,
}

impl InMemoryTriggerStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            triggers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a trigger for an event name. Load order is registration
    /// order.
    pub async fn register(&self, event_name: impl Into<String>, trigger: TriggerDefinition) {
        let mut guard = self.triggers.write().await;
        guard.entry(event_name.into()).or_default().push(trigger);
    }
}

impl Default for InMemoryTriggerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TriggerStore for InMemoryTriggerStore {
    async fn list(&self, event_name: &str) -> Result<Vec<TriggerDefinition>, StorageError> {
        let guard = self.triggers.read().await;
        Ok(guard.get(event_name).cloned().unwrap_or_default())
    }
}
