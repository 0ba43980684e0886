//! Inbound event payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An external event delivered to the dispatcher — a webhook payload, a
/// user action, or a scheduled signal.
///
/// Immutable once constructed. Attributes are an open mapping of arbitrary
/// JSON values; condition matching and the merged process configuration
/// both read from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    /// Event name triggers are registered under (e.g. `"github.push"`).
    pub name: String,
    /// Arbitrary structured payload.
    pub attributes: Map<String, Value>,
    /// When the event arrived at this system.
    pub received_at: DateTime<Utc>,
}

impl Event {
    /// Create an event stamped with the current time.
    pub fn new(name: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            attributes,
            received_at: Utc::now(),
        }
    }
}
