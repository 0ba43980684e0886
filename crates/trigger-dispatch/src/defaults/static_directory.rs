//! Fixed-map identity directory for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::DirectoryError;
use crate::traits::IdentityDirectory;
use crate::types::Identity;

/// An identity directory backed by a fixed username map.
pub struct StaticDirectory {
    users: RwLock<HashMap<String, Identity>>,
}

impl StaticDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Add a user, minting a fresh id. Returns the stored identity.
    pub async fn add_user(&self, username: impl Into<String>) -> Identity {
        let username = username.into();
        let identity = Identity {
            id: Uuid::new_v4(),
            username: username.clone(),
        };
        self.users.write().await.insert(username, identity.clone());
        identity
    }
}

impl Default for StaticDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityDirectory for StaticDirectory {
    async fn lookup(&self, author: &str) -> Result<Option<Identity>, DirectoryError> {
        let guard = self.users.read().await;
        Ok(guard.get(author).cloned())
    }
}
