//! Launcher that records requests instead of executing anything.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::LaunchError;
use crate::traits::ProcessLauncher;
use crate::types::LaunchRequest;

/// Records every launch request and accepts it with the request's own
/// instance id. Used by tests and local development; production deployments
/// plug in a client for the real process engine.
pub struct RecordingLauncher {
    launched: RwLock<Vec<LaunchRequest>>,
}

impl RecordingLauncher {
    /// Create a new empty recorder.
    pub fn new() -> Self {
        Self {
            launched: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of all recorded requests, in acceptance order.
    pub async fn launched(&self) -> Vec<LaunchRequest> {
        self.launched.read().await.clone()
    }
}

impl Default for RecordingLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessLauncher for RecordingLauncher {
    async fn launch(&self, request: LaunchRequest) -> Result<Uuid, LaunchError> {
        let instance_id = request.instance_id;
        self.launched.write().await.push(request);
        Ok(instance_id)
    }
}
