//! trigger-dispatch — event trigger matching and process dispatch.
//!
//! An inbound event carries a name and a structured attribute payload. This
//! crate finds every registered trigger whose declared conditions the event
//! satisfies, resolves the initiator identity per match, folds a layered
//! process configuration (org < project < request < policy), and submits one
//! independent launch request per match. Failure in one trigger's launch
//! sequence never affects its siblings.
//!
//! The crate is a library embedded behind an HTTP/event-source façade; all
//! external systems (trigger storage, identity directory, configuration
//! storage, policy engine, process engine) are collaborator traits with
//! in-memory defaults.

pub mod defaults;
pub mod dispatcher;
pub mod errors;
pub mod identity;
pub mod matcher;
pub mod merge;
pub mod traits;
pub mod types;

// Re-export public types at the crate level.

// defaults
pub use defaults::{
    FileTriggerStore, InMemoryConfigStore, InMemoryTriggerStore, RecordingLauncher,
    StaticDirectory,
};

// dispatcher
pub use dispatcher::{DispatcherBuilder, DispatcherConfig, TriggerDispatcher};

// errors
pub use errors::{
    DirectoryError, DispatchError, IdentityResolutionError, LaunchError, MatchError, StorageError,
    TriggerFailure,
};

// identity
pub use identity::IdentityResolver;

// merge
pub use merge::{deep_merge, merge_layers, ConfigurationLayer, LayerKind};

// traits
pub use traits::{
    AsIsEnricher, ConfigurationStore, IdentityDirectory, PolicyContext, PolicyEngine,
    ProcessLauncher, TriggerEnricher, TriggerStore,
};

// types
pub use types::{
    DispatchOutcome, DispatchStatus, Event, Identity, LaunchRequest, TriggerDefinition,
};
