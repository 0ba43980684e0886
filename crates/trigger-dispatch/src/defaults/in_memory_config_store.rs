//! In-memory organization/project configuration store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::StorageError;
use crate::traits::ConfigurationStore;

/// Org and project default configurations behind `RwLock`ed maps.
///
/// Unset ids resolve to an empty mapping, matching the contract that
/// absent configuration contributes nothing to the merge.
pub struct InMemoryConfigStore {
    orgs: RwLock<HashMap<Uuid, Map<String, Value>>>,
    projects: RwLock<HashMap<Uuid, Map<String, Value>>>,
}

impl InMemoryConfigStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            orgs: RwLock::new(HashMap::new()),
            projects: RwLock::new(HashMap::new()),
        }
    }

    /// Set the organization-level default configuration.
    pub async fn set_org_config(&self, org_id: Uuid, config: Map<String, Value>) {
        self.orgs.write().await.insert(org_id, config);
    }

    /// Set the project-level default configuration.
    pub async fn set_project_config(&self, project_id: Uuid, config: Map<String, Value>) {
        self.projects.write().await.insert(project_id, config);
    }
}

impl Default for InMemoryConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryConfigStore {
    async fn org_config(&self, org_id: Uuid) -> Result<Map<String, Value>, StorageError> {
        let guard = self.orgs.read().await;
        Ok(guard.get(&org_id).cloned().unwrap_or_default())
    }

    async fn project_config(&self, project_id: Uuid) -> Result<Map<String, Value>, StorageError> {
        let guard = self.projects.read().await;
        Ok(guard.get(&project_id).cloned().unwrap_or_default())
    }
}
