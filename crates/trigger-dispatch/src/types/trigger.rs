//! Stored trigger definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A registered rule binding an event-name/condition pattern to a process
/// to launch.
///
/// Created and updated by an external trigger-management component;
/// read-only to the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TriggerDefinition {
    pub id: Uuid,
    pub org_id: Uuid,
    pub project_id: Uuid,
    /// Repository holding the process definition.
    pub repository_id: Uuid,
    /// Flow name to start within the repository.
    pub entry_point: String,
    /// Condition pattern matched against event attributes. Empty matches
    /// any event.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub conditions: Map<String, Value>,
    /// Arguments merged into the launched process configuration.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub arguments: Map<String, Value>,
    /// When true, the initiator is the event's `author` resolved through
    /// the identity directory; when false, the authenticated caller.
    #[serde(default)]
    pub use_initiator_identity: bool,
    /// Profiles activated in the launched process. Empty means the default
    /// profile.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub active_profiles: Vec<String>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}
