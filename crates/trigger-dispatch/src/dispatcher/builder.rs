//! Dispatcher builder — assembles collaborators into a [`TriggerDispatcher`].

use std::sync::Arc;

use super::{DispatcherConfig, TriggerDispatcher};
use crate::defaults::{
    InMemoryConfigStore, InMemoryTriggerStore, RecordingLauncher, StaticDirectory,
};
use crate::identity::IdentityResolver;
use crate::traits::{
    AsIsEnricher, ConfigurationStore, IdentityDirectory, PolicyEngine, ProcessLauncher,
    TriggerEnricher, TriggerStore,
};

/// Builder for assembling the [`TriggerDispatcher`].
///
/// All collaborator fields are optional — in-memory defaults are applied
/// during [`build()`](DispatcherBuilder::build), which makes the bare
/// builder directly usable in tests and local development.
pub struct DispatcherBuilder {
    triggers: Option<Arc<dyn TriggerStore>>,
    directory: Option<Arc<dyn IdentityDirectory>>,
    configs: Option<Arc<dyn ConfigurationStore>>,
    policy: Option<Arc<dyn PolicyEngine>>,
    launcher: Option<Arc<dyn ProcessLauncher>>,
    enricher: Option<Arc<dyn TriggerEnricher>>,
    config: DispatcherConfig,
}

impl DispatcherBuilder {
    pub(super) fn new() -> Self {
        Self {
            triggers: None,
            directory: None,
            configs: None,
            policy: None,
            launcher: None,
            enricher: None,
            config: DispatcherConfig::default(),
        }
    }

    /// Set the trigger store. Default: empty [`InMemoryTriggerStore`].
    pub fn trigger_store(mut self, store: impl TriggerStore + 'static) -> Self {
        self.triggers = Some(Arc::new(store));
        self
    }

    /// Set the identity directory. Default: empty [`StaticDirectory`].
    pub fn directory(mut self, directory: impl IdentityDirectory + 'static) -> Self {
        self.directory = Some(Arc::new(directory));
        self
    }

    /// Set the org/project configuration store. Default:
    /// [`InMemoryConfigStore`].
    pub fn config_store(mut self, store: impl ConfigurationStore + 'static) -> Self {
        self.configs = Some(Arc::new(store));
        self
    }

    /// Set the policy engine. Default: none — the policy layer contributes
    /// nothing.
    pub fn policy(mut self, engine: impl PolicyEngine + 'static) -> Self {
        self.policy = Some(Arc::new(engine));
        self
    }

    /// Set the process launcher. Default: [`RecordingLauncher`].
    pub fn launcher(mut self, launcher: impl ProcessLauncher + 'static) -> Self {
        self.launcher = Some(Arc::new(launcher));
        self
    }

    /// Share an already-wrapped launcher (e.g. to inspect a
    /// [`RecordingLauncher`] after dispatching).
    pub fn launcher_arc(mut self, launcher: Arc<dyn ProcessLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Set the trigger enricher. Default: [`AsIsEnricher`].
    pub fn enricher(mut self, enricher: impl TriggerEnricher + 'static) -> Self {
        self.enricher = Some(Arc::new(enricher));
        self
    }

    /// Replace the whole dispatcher configuration.
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Bound on concurrent launch sequences.
    pub fn max_in_flight(mut self, max: usize) -> Self {
        self.config.max_in_flight = max;
        self
    }

    /// Skip launching for the given event name.
    pub fn disable_event(mut self, event_name: impl Into<String>) -> Self {
        self.config.disabled_events.push(event_name.into());
        self
    }

    /// Skip launching for every event.
    pub fn disable_all(mut self, disabled: bool) -> Self {
        self.config.disable_all = disabled;
        self
    }

    /// Assemble the dispatcher, applying defaults for unset collaborators.
    pub fn build(self) -> TriggerDispatcher {
        let directory = self
            .directory
            .unwrap_or_else(|| Arc::new(StaticDirectory::new()));

        TriggerDispatcher {
            triggers: self
                .triggers
                .unwrap_or_else(|| Arc::new(InMemoryTriggerStore::new())),
            configs: self
                .configs
                .unwrap_or_else(|| Arc::new(InMemoryConfigStore::new())),
            policy: self.policy,
            launcher: self
                .launcher
                .unwrap_or_else(|| Arc::new(RecordingLauncher::new())),
            enricher: self.enricher.unwrap_or_else(|| Arc::new(AsIsEnricher)),
            identity: IdentityResolver::new(directory),
            config: self.config,
        }
    }
}
