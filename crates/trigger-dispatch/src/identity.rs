//! Initiator identity resolution.

use std::sync::Arc;

use serde_json::Value;

use super::errors::IdentityResolutionError;
use super::matcher::scalar_string;
use super::traits::IdentityDirectory;
use super::types::{Event, Identity, TriggerDefinition};

/// Event attribute naming the acting user.
pub const AUTHOR_KEY: &str = "author";

/// Decides who a launched process runs as.
///
/// Two policies, selected per trigger:
/// - `use_initiator_identity == false`: the authenticated caller passed
///   explicitly into [`dispatch`](crate::dispatcher::TriggerDispatcher::dispatch).
///   No caller means the dispatcher was invoked outside an authenticated
///   session, which is a precondition failure for the whole call.
/// - `use_initiator_identity == true`: the event's `author` attribute,
///   resolved through the identity directory. Failures here are scoped to
///   the one trigger being processed.
pub struct IdentityResolver {
    directory: Arc<dyn IdentityDirectory>,
}

impl IdentityResolver {
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve the initiator for one trigger match.
    pub async fn resolve(
        &self,
        trigger: &TriggerDefinition,
        event: &Event,
        caller: Option<&Identity>,
    ) -> Result<Identity, IdentityResolutionError> {
        if !trigger.use_initiator_identity {
            return caller
                .cloned()
                .ok_or(IdentityResolutionError::Unauthenticated);
        }

        let author = author_of(event);
        let identity = self.directory.lookup(&author).await?;
        identity.ok_or(IdentityResolutionError::UnknownAuthor { author })
    }
}

/// The event's `author` attribute in string form, empty when absent.
fn author_of(event: &Event) -> String {
    match event.attributes.get(AUTHOR_KEY) {
        Some(Value::Null) | None => String::new(),
        Some(value) => scalar_string(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DirectoryError;
    use async_trait::async_trait;
    use serde_json::json;
    use uuid::Uuid;

    struct OneUserDirectory {
        username: String,
        identity: Identity,
    }

    #[async_trait]
    impl IdentityDirectory for OneUserDirectory {
        async fn lookup(&self, author: &str) -> Result<Option<Identity>, DirectoryError> {
            Ok((author == self.username).then(|| self.identity.clone()))
        }
    }

    struct BrokenDirectory;

    #[async_trait]
    impl IdentityDirectory for BrokenDirectory {
        async fn lookup(&self, _author: &str) -> Result<Option<Identity>, DirectoryError> {
            Err(DirectoryError::Backend {
                message: "connection refused".into(),
            })
        }
    }

    fn trigger(use_initiator_identity: bool) -> TriggerDefinition {
        TriggerDefinition {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            repository_id: Uuid::new_v4(),
            entry_point: "main".into(),
            conditions: Default::default(),
            arguments: Default::default(),
            use_initiator_identity,
            active_profiles: vec![],
            enabled: true,
        }
    }

    fn event(attrs: serde_json::Value) -> Event {
        match attrs {
            serde_json::Value::Object(m) => Event::new("test", m),
            other => panic!("expected object, got {other}"),
        }
    }

    fn alice() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            username: "alice".into(),
        }
    }

    #[tokio::test]
    async fn caller_identity_when_flag_is_off() {
        let resolver = IdentityResolver::new(Arc::new(BrokenDirectory));
        let caller = alice();
        let resolved = resolver
            .resolve(&trigger(false), &event(json!({})), Some(&caller))
            .await
            .expect("resolve");
        assert_eq!(resolved, caller);
    }

    #[tokio::test]
    async fn missing_caller_is_unauthenticated() {
        let resolver = IdentityResolver::new(Arc::new(BrokenDirectory));
        let err = resolver
            .resolve(&trigger(false), &event(json!({})), None)
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityResolutionError::Unauthenticated));
    }

    #[tokio::test]
    async fn author_resolved_through_directory() {
        let identity = alice();
        let resolver = IdentityResolver::new(Arc::new(OneUserDirectory {
            username: "alice".into(),
            identity: identity.clone(),
        }));
        let resolved = resolver
            .resolve(&trigger(true), &event(json!({"author": "alice"})), None)
            .await
            .expect("resolve");
        assert_eq!(resolved, identity);
    }

    #[tokio::test]
    async fn unknown_author_fails() {
        let resolver = IdentityResolver::new(Arc::new(OneUserDirectory {
            username: "alice".into(),
            identity: alice(),
        }));
        let err = resolver
            .resolve(&trigger(true), &event(json!({"author": "mallory"})), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IdentityResolutionError::UnknownAuthor { author } if author == "mallory"
        ));
    }

    #[tokio::test]
    async fn absent_author_defaults_to_empty_string() {
        let resolver = IdentityResolver::new(Arc::new(OneUserDirectory {
            username: "alice".into(),
            identity: alice(),
        }));
        let err = resolver
            .resolve(&trigger(true), &event(json!({})), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IdentityResolutionError::UnknownAuthor { author } if author.is_empty()
        ));
    }

    #[tokio::test]
    async fn directory_failure_propagates_as_resolution_error() {
        let resolver = IdentityResolver::new(Arc::new(BrokenDirectory));
        let err = resolver
            .resolve(&trigger(true), &event(json!({"author": "alice"})), None)
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityResolutionError::Directory(_)));
    }

    #[tokio::test]
    async fn numeric_author_is_stringified() {
        let resolver = IdentityResolver::new(Arc::new(OneUserDirectory {
            username: "1042".into(),
            identity: alice(),
        }));
        let resolved = resolver
            .resolve(&trigger(true), &event(json!({"author": 1042})), None)
            .await;
        assert!(resolved.is_ok());
    }
}
