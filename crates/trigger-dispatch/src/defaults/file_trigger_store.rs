//! File-system backed trigger store.
//!
//! Layout:
//! ```text
//! {base_dir}/triggers/{event_name}.json — Vec<TriggerDefinition>
//! ```

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::StorageError;
use crate::traits::TriggerStore;
use crate::types::TriggerDefinition;

/// File-system backed store for trigger definitions, one JSON file per
/// event name.
///
/// Writes use a temp-file-then-rename pattern so a crash mid-write cannot
/// corrupt the store.
pub struct FileTriggerStore {
    triggers_dir: PathBuf,
}

impl FileTriggerStore {
    /// Create a new `FileTriggerStore` rooted at `base_dir`.
    ///
    /// Creates `{base_dir}/triggers/` if it doesn't exist.
    pub fn new(base_dir: PathBuf) -> Result<Self, StorageError> {
        let triggers_dir = base_dir.join("triggers");
        std::fs::create_dir_all(&triggers_dir).map_err(|e| StorageError::Backend {
            message: format!("failed to create triggers directory: {e}"),
        })?;
        Ok(Self { triggers_dir })
    }

    fn path_for(&self, event_name: &str) -> PathBuf {
        self.triggers_dir.join(format!("{event_name}.json"))
    }

    fn read(&self, event_name: &str) -> Result<Vec<TriggerDefinition>, StorageError> {
        let path = self.path_for(event_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read(&path).map_err(|e| StorageError::Backend {
            message: format!("failed to read triggers: {e}"),
        })?;
        serde_json::from_slice(&data).map_err(|e| StorageError::Backend {
            message: format!("failed to deserialize triggers: {e}"),
        })
    }

    /// Append a trigger to the event's definition file.
    pub fn register(
        &self,
        event_name: &str,
        trigger: TriggerDefinition,
    ) -> Result<(), StorageError> {
        let mut triggers = self.read(event_name)?;
        triggers.push(trigger);

        let data = serde_json::to_vec_pretty(&triggers).map_err(|e| StorageError::Backend {
            message: format!("failed to serialize triggers: {e}"),
        })?;
        atomic_write(&self.path_for(event_name), &data)
    }
}

/// Atomic write: serialize to temp file, then rename over the target.
fn atomic_write(path: &std::path::Path, data: &[u8]) -> Result<(), StorageError> {
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, data).map_err(|e| StorageError::Backend {
        message: format!("failed to write temp file: {e}"),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| StorageError::Backend {
        message: format!("failed to rename temp file: {e}"),
    })?;
    Ok(())
}

#[async_trait]
impl TriggerStore for FileTriggerStore {
    async fn list(&self, event_name: &str) -> Result<Vec<TriggerDefinition>, StorageError> {
        self.read(event_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn sample_trigger(entry_point: &str) -> TriggerDefinition {
        TriggerDefinition {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            repository_id: Uuid::new_v4(),
            entry_point: entry_point.into(),
            conditions: match json!({"branch": "main"}) {
                serde_json::Value::Object(m) => m,
                _ => unreachable!(),
            },
            arguments: Default::default(),
            use_initiator_identity: false,
            active_profiles: vec!["ci".into()],
            enabled: true,
        }
    }

    #[tokio::test]
    async fn register_and_list_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTriggerStore::new(dir.path().to_path_buf()).expect("create store");

        store
            .register("repo.push", sample_trigger("deploy"))
            .expect("register 1");
        store
            .register("repo.push", sample_trigger("notify"))
            .expect("register 2");

        let listed = store.list("repo.push").await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].entry_point, "deploy");
        assert_eq!(listed[1].entry_point, "notify");
        assert_eq!(listed[0].conditions["branch"], json!("main"));
    }

    #[tokio::test]
    async fn unknown_event_name_lists_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileTriggerStore::new(dir.path().to_path_buf()).expect("create store");
        let listed = store.list("no.such.event").await.expect("list");
        assert!(listed.is_empty());
    }
}
