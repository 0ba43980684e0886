//! Layered configuration merge.
//!
//! The launched process configuration is folded from four layers in fixed
//! precedence order: organization defaults < project defaults < request <
//! policy overrides. The policy layer is deliberately last so governance
//! overrides cannot be suppressed by any request.

use serde::{Deserialize, Serialize};
use serde_json::map::Entry;
use serde_json::{Map, Value};

/// Key under which the active profile list is injected into the merged
/// configuration.
pub const ACTIVE_PROFILES_KEY: &str = "activeProfiles";

/// Profile activated when a trigger declares none.
pub const DEFAULT_PROFILE: &str = "default";

/// Precedence rank of a configuration layer, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    OrganizationDefaults,
    ProjectDefaults,
    Request,
    PolicyOverride,
}

/// A named configuration mapping with an explicit precedence rank.
#[derive(Debug, Clone)]
pub struct ConfigurationLayer {
    pub kind: LayerKind,
    pub values: Map<String, Value>,
}

impl ConfigurationLayer {
    pub fn new(kind: LayerKind, values: Map<String, Value>) -> Self {
        Self { kind, values }
    }

    /// A layer that contributes nothing (absent optional collaborator).
    pub fn empty(kind: LayerKind) -> Self {
        Self {
            kind,
            values: Map::new(),
        }
    }
}

/// Deep-merge `overlay` into `base`.
///
/// Overlapping keys whose values are both mappings merge recursively;
/// every other overlap is replaced by the overlay value outright. Arrays
/// are replaced, never merged element-wise.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, incoming) in overlay {
        match base.entry(key) {
            Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                (Value::Object(existing), Value::Object(incoming)) => {
                    deep_merge(existing, incoming);
                }
                (existing, incoming) => *existing = incoming,
            },
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
        }
    }
}

/// Fold layers in precedence order and inject the active profile list.
///
/// Layers may be supplied in any order; the fold always applies the fixed
/// `LayerKind` precedence. Missing layers are simply not supplied — the
/// merge is total and never fails.
pub fn merge_layers(
    mut layers: Vec<ConfigurationLayer>,
    active_profiles: &[String],
) -> Map<String, Value> {
    layers.sort_by_key(|layer| layer.kind);

    let mut merged = Map::new();
    for layer in layers {
        deep_merge(&mut merged, layer.values);
    }

    let profiles = effective_profiles(active_profiles);
    merged.insert(
        ACTIVE_PROFILES_KEY.to_string(),
        Value::Array(profiles.into_iter().map(Value::String).collect()),
    );

    merged
}

/// The trigger's declared profiles, or `["default"]` when it declares none.
pub fn effective_profiles(active_profiles: &[String]) -> Vec<String> {
    if active_profiles.is_empty() {
        vec![DEFAULT_PROFILE.to_string()]
    } else {
        active_profiles.to_vec()
    }
}
