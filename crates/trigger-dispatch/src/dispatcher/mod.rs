//! Trigger dispatch orchestration.
//!
//! One dispatch cycle: load the triggers registered for an event name,
//! filter them through condition matching, then for each surviving trigger
//! independently resolve the initiator, assemble the layered configuration,
//! and submit a launch request. A single trigger's failure never prevents,
//! delays, or invalidates its siblings.

mod builder;

pub use builder::DispatcherBuilder;

use std::sync::Arc;

use futures::StreamExt;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{DispatchError, TriggerFailure};
use super::identity::IdentityResolver;
use super::matcher;
use super::merge::{self, ConfigurationLayer, LayerKind};
use super::traits::{
    ConfigurationStore, PolicyContext, PolicyEngine, ProcessLauncher, TriggerEnricher,
    TriggerStore,
};
use super::types::{
    DispatchOutcome, DispatchStatus, Event, Identity, LaunchRequest, TriggerDefinition,
};

/// Configuration key holding the process arguments.
pub const ARGUMENTS_KEY: &str = "arguments";

/// Argument key holding the raw event attributes.
pub const EVENT_KEY: &str = "event";

/// Operator-facing dispatcher settings.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Maximum launch sequences in flight at once. Default: 8.
    pub max_in_flight: usize,
    /// Kill switch: skip launching for every event.
    pub disable_all: bool,
    /// Event names for which launching is skipped.
    pub disabled_events: Vec<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 8,
            disable_all: false,
            disabled_events: Vec::new(),
        }
    }
}

/// The dispatch pipeline. Stateless across cycles; every collaborator is
/// shared behind an `Arc` so the dispatcher itself is cheap to clone into
/// handlers.
///
/// Construct via [`TriggerDispatcher::builder()`].
pub struct TriggerDispatcher {
    pub(super) triggers: Arc<dyn TriggerStore>,
    pub(super) configs: Arc<dyn ConfigurationStore>,
    pub(super) policy: Option<Arc<dyn PolicyEngine>>,
    pub(super) launcher: Arc<dyn ProcessLauncher>,
    pub(super) enricher: Arc<dyn TriggerEnricher>,
    pub(super) identity: IdentityResolver,
    pub(super) config: DispatcherConfig,
}

impl TriggerDispatcher {
    /// Create a new [`DispatcherBuilder`].
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Run one dispatch cycle for an incoming event.
    ///
    /// Returns one [`DispatchOutcome`] per trigger that passed condition
    /// matching, in trigger-load order. The only fatal failures are a
    /// trigger-list read error and a missing authenticated caller when a
    /// matched trigger requires one; everything else is isolated into the
    /// per-trigger outcome.
    ///
    /// Dropping the returned future abandons trigger units that have not
    /// started; launches already submitted are not retracted.
    pub async fn dispatch(
        &self,
        event_id: &str,
        event_name: &str,
        event: &Event,
        caller: Option<&Identity>,
    ) -> Result<Vec<DispatchOutcome>, DispatchError> {
        let matched: Vec<TriggerDefinition> = self
            .triggers
            .list(event_name)
            .await?
            .into_iter()
            .map(|t| self.enricher.enrich(t))
            .filter(|t| t.enabled)
            .filter(|t| self.filter(event_id, event, t))
            .collect();

        tracing::debug!(
            event_id = %event_id,
            event_name = %event_name,
            matched = matched.len(),
            "trigger conditions evaluated"
        );

        if self.is_disabled(event_name) {
            tracing::warn!(
                event_id = %event_id,
                event_name = %event_name,
                "triggers disabled, skipping {} match(es)",
                matched.len()
            );
            return Ok(matched
                .iter()
                .map(|t| DispatchOutcome {
                    trigger_id: t.id,
                    status: DispatchStatus::Skipped {
                        reason: format!("triggers disabled for event '{event_name}'"),
                    },
                })
                .collect());
        }

        // Hard precondition: a trigger that launches as the caller cannot
        // be satisfied outside an authenticated session.
        if caller.is_none() && matched.iter().any(|t| !t.use_initiator_identity) {
            return Err(DispatchError::Unauthenticated);
        }

        // Per-trigger units run concurrently, bounded by max_in_flight;
        // `buffered` yields completions in trigger-load order.
        let outcomes: Vec<DispatchOutcome> =
            futures::stream::iter(matched.into_iter().map(|trigger| async move {
                let trigger_id = trigger.id;
                let status = match self
                    .run_trigger(event_name, &trigger, event, caller)
                    .await
                {
                    Ok(instance_id) => {
                        tracing::info!(
                            event_id = %event_id,
                            trigger_id = %trigger_id,
                            instance_id = %instance_id,
                            "new process launched"
                        );
                        DispatchStatus::Launched { instance_id }
                    }
                    Err(error) => {
                        tracing::error!(
                            event_id = %event_id,
                            event_name = %event_name,
                            trigger_id = %trigger_id,
                            "trigger dispatch failed: {error}"
                        );
                        DispatchStatus::Failed { error }
                    }
                };
                DispatchOutcome { trigger_id, status }
            }))
            .buffered(self.config.max_in_flight.max(1))
            .collect()
            .await;

        Ok(outcomes)
    }

    /// Condition filter. An evaluation error drops the trigger from
    /// consideration; it never aborts the cycle.
    fn filter(&self, event_id: &str, event: &Event, trigger: &TriggerDefinition) -> bool {
        match matcher::matches(&event.attributes, &trigger.conditions) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!(
                    event_id = %event_id,
                    trigger_id = %trigger.id,
                    "error while matching event conditions: {e}"
                );
                false
            }
        }
    }

    fn is_disabled(&self, event_name: &str) -> bool {
        self.config.disable_all || self.config.disabled_events.iter().any(|n| n == event_name)
    }

    /// One trigger's launch sequence: identity, configuration, submission.
    async fn run_trigger(
        &self,
        event_name: &str,
        trigger: &TriggerDefinition,
        event: &Event,
        caller: Option<&Identity>,
    ) -> Result<Uuid, TriggerFailure> {
        let initiator = self.identity.resolve(trigger, event, caller).await?;

        let org_cfg = self.configs.org_config(trigger.org_id).await?;
        let project_cfg = self.configs.project_config(trigger.project_id).await?;

        // Request layer: the trigger's declared arguments plus the raw
        // event payload under "arguments.event".
        let mut arguments = trigger.arguments.clone();
        arguments.insert(
            EVENT_KEY.to_string(),
            Value::Object(event.attributes.clone()),
        );
        let mut request = Map::new();
        request.insert(ARGUMENTS_KEY.to_string(), Value::Object(arguments));

        let policy_cfg = match &self.policy {
            Some(engine) => {
                let ctx = PolicyContext {
                    org_id: trigger.org_id,
                    project_id: trigger.project_id,
                    event_name: event_name.to_string(),
                };
                engine.overrides_for(&ctx).await?.unwrap_or_default()
            }
            None => Map::new(),
        };

        let configuration = merge::merge_layers(
            vec![
                ConfigurationLayer::new(LayerKind::OrganizationDefaults, org_cfg),
                ConfigurationLayer::new(LayerKind::ProjectDefaults, project_cfg),
                ConfigurationLayer::new(LayerKind::Request, request),
                ConfigurationLayer::new(LayerKind::PolicyOverride, policy_cfg),
            ],
            &trigger.active_profiles,
        );

        let request = LaunchRequest {
            instance_id: Uuid::new_v4(),
            initiator,
            org_id: trigger.org_id,
            project_id: trigger.project_id,
            repository_id: trigger.repository_id,
            entry_point: trigger.entry_point.clone(),
            active_profiles: merge::effective_profiles(&trigger.active_profiles),
            configuration,
        };

        let instance_id = self.launcher.launch(request).await?;
        Ok(instance_id)
    }
}
