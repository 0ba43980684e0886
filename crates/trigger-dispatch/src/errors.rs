//! Error types for all trigger-dispatch collaborator operations.

use thiserror::Error;

/// Errors from [`TriggerStore`](super::traits::TriggerStore) and
/// [`ConfigurationStore`](super::traits::ConfigurationStore).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend error: {message}")]
    Backend { message: String },
}

/// Errors from [`IdentityDirectory`](super::traits::IdentityDirectory).
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("directory backend error: {message}")]
    Backend { message: String },
}

/// Errors from [`ProcessLauncher`](super::traits::ProcessLauncher).
#[derive(Debug, Clone, Error)]
pub enum LaunchError {
    #[error("launch rejected: {message}")]
    Rejected { message: String },
    #[error("process engine error: {message}")]
    Engine { message: String },
}

/// Errors from condition evaluation in [`matcher`](super::matcher).
#[derive(Debug, Clone, Error)]
pub enum MatchError {
    #[error("condition nesting exceeds depth limit ({limit})")]
    DepthLimit { limit: usize },
}

/// Errors from [`IdentityResolver`](super::identity::IdentityResolver).
#[derive(Debug, Clone, Error)]
pub enum IdentityResolutionError {
    /// The trigger requires the authenticated caller, but dispatch was
    /// invoked without one.
    #[error("no authenticated caller in dispatch context")]
    Unauthenticated,
    /// The event's author is not known to the identity directory.
    #[error("user not found: {author}")]
    UnknownAuthor { author: String },
    /// The directory backend failed.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}

/// Failure of a single trigger's launch sequence. Scoped to that trigger:
/// recorded in its [`DispatchOutcome`](super::types::DispatchOutcome) and
/// never propagated to siblings.
#[derive(Debug, Clone, Error)]
pub enum TriggerFailure {
    #[error("identity resolution failed: {0}")]
    Identity(#[from] IdentityResolutionError),
    #[error("configuration read failed: {0}")]
    Configuration(#[from] StorageError),
    #[error("launch failed: {0}")]
    Launch(#[from] LaunchError),
}

/// Fatal errors from [`TriggerDispatcher::dispatch`](super::dispatcher::TriggerDispatcher::dispatch).
///
/// Anything that aborts the whole dispatch call. Per-trigger failures are
/// not represented here — they become failed outcomes instead.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The trigger list could not be loaded.
    #[error("trigger storage error: {0}")]
    Storage(#[from] StorageError),
    /// A matched trigger needs the authenticated caller, but dispatch was
    /// invoked without one.
    #[error("dispatch requires an authenticated caller")]
    Unauthenticated,
}
