//! Collaborator trait interfaces.
//!
//! Every external collaborator is defined as an async trait. Default
//! implementations live in [`defaults`](crate::defaults); production
//! deployments plug in their own backends via the
//! [`DispatcherBuilder`](crate::dispatcher::DispatcherBuilder).

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{DirectoryError, LaunchError, StorageError};
use super::types::{Identity, LaunchRequest, TriggerDefinition};

/// Where trigger definitions come from.
///
/// The dispatcher reads, never writes. A backend failure here is fatal for
/// the whole dispatch call — nothing can be matched without the list.
#[async_trait]
pub trait TriggerStore: Send + Sync {
    /// All trigger definitions registered for `event_name`.
    async fn list(&self, event_name: &str) -> Result<Vec<TriggerDefinition>, StorageError>;
}

/// The user/identity directory (LDAP in the original deployment).
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Look up (or create, for directory-backed backends) the identity for
    /// `author`. Returns `None` when the directory has no such user.
    async fn lookup(&self, author: &str) -> Result<Option<Identity>, DirectoryError>;
}

/// Organization and project configuration defaults.
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Organization-level default configuration. Empty when none is set.
    async fn org_config(&self, org_id: Uuid) -> Result<Map<String, Value>, StorageError>;

    /// Project-level default configuration. Empty when none is set.
    async fn project_config(&self, project_id: Uuid) -> Result<Map<String, Value>, StorageError>;
}

/// What the policy engine sees when asked for overrides.
#[derive(Debug, Clone)]
pub struct PolicyContext {
    pub org_id: Uuid,
    pub project_id: Uuid,
    pub event_name: String,
}

/// Governance overrides applied as the highest-precedence configuration
/// layer. The collaborator itself is optional; so is its answer.
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Mandatory configuration overrides for the given context, or `None`
    /// when no policy applies.
    async fn overrides_for(
        &self,
        ctx: &PolicyContext,
    ) -> Result<Option<Map<String, Value>>, StorageError>;
}

/// The external process execution engine.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Submit one launch request. Returns the accepted instance id.
    /// The dispatcher never retries; there is no rollback once accepted.
    async fn launch(&self, request: LaunchRequest) -> Result<Uuid, LaunchError>;
}

/// Transforms trigger definitions after loading and before matching.
///
/// Lets a deployment inject computed conditions or arguments without
/// touching the store. Must be pure — the dispatcher may call it
/// concurrently across dispatch cycles.
pub trait TriggerEnricher: Send + Sync {
    fn enrich(&self, trigger: TriggerDefinition) -> TriggerDefinition;
}

/// The default enricher: passes definitions through untouched.
pub struct AsIsEnricher;

impl TriggerEnricher for AsIsEnricher {
    fn enrich(&self, trigger: TriggerDefinition) -> TriggerDefinition {
        trigger
    }
}
