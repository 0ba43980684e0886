//! Launch requests and per-trigger dispatch outcomes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::TriggerFailure;

/// A resolved initiator identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
}

/// Everything the external process engine needs to start one instance.
///
/// Transient: exists only between dispatch and launch submission. The
/// `instance_id` is allocated fresh per dispatch and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LaunchRequest {
    pub instance_id: Uuid,
    pub initiator: Identity,
    pub org_id: Uuid,
    pub project_id: Uuid,
    pub repository_id: Uuid,
    pub entry_point: String,
    pub active_profiles: Vec<String>,
    /// Merged configuration: org defaults < project defaults < request <
    /// policy overrides.
    pub configuration: Map<String, Value>,
}

/// Terminal state of one trigger's launch sequence.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum DispatchStatus {
    /// The process engine accepted the launch.
    Launched { instance_id: Uuid },
    /// Identity resolution, configuration assembly, or launch submission
    /// failed for this trigger.
    Failed { error: TriggerFailure },
    /// Triggers are administratively disabled for this event name.
    Skipped { reason: String },
}

/// Per-trigger record of a dispatch cycle. One per trigger that passed
/// condition matching, in trigger-load order; never mutated after creation.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub trigger_id: Uuid,
    pub status: DispatchStatus,
}

impl DispatchOutcome {
    /// Whether this trigger's launch was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self.status, DispatchStatus::Launched { .. })
    }

    /// The launched instance id, if any.
    pub fn instance_id(&self) -> Option<Uuid> {
        match self.status {
            DispatchStatus::Launched { instance_id } => Some(instance_id),
            _ => None,
        }
    }
}
