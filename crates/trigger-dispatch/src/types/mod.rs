//! Data model: events, trigger definitions, and launch/outcome records.

mod event;
mod launch;
mod trigger;

pub use event::Event;
pub use launch::{DispatchOutcome, DispatchStatus, Identity, LaunchRequest};
pub use trigger::TriggerDefinition;
