//! Default implementations of the collaborator traits.
//!
//! These defaults let the dispatcher run with zero external configuration.
//! Each can be replaced via the
//! [`DispatcherBuilder`](crate::dispatcher::DispatcherBuilder).

pub mod file_trigger_store;
pub mod in_memory_config_store;
pub mod in_memory_trigger_store;
pub mod recording_launcher;
pub mod static_directory;

pub use file_trigger_store::FileTriggerStore;
pub use in_memory_config_store::InMemoryConfigStore;
pub use in_memory_trigger_store::InMemoryTriggerStore;
pub use recording_launcher::RecordingLauncher;
pub use static_directory::StaticDirectory;
