//! Condition matching — does an event satisfy a trigger's declared
//! conditions?
//!
//! Conditions are a non-exhaustive filter: every condition key must be
//! satisfied by the event, extra event keys are ignored. Matching fails
//! closed — a missing key is a non-match, never an error.

use serde_json::{Map, Value};

use super::errors::MatchError;

/// Recursion guard for pathologically nested payloads.
const MAX_DEPTH: usize = 64;

/// Compare event attributes against a trigger's condition pattern.
///
/// Rules:
/// - empty conditions match any event;
/// - each condition key must resolve in the event, directly or as a dotted
///   path into nested mappings;
/// - scalar conditions require equality, normalizing to string form when
///   the JSON types differ (`42` matches `"42"`);
/// - a sequence condition means "any of";
/// - a mapping condition recurses into the corresponding event mapping.
pub fn matches(
    event: &Map<String, Value>,
    conditions: &Map<String, Value>,
) -> Result<bool, MatchError> {
    matches_at(event, conditions, 0)
}

fn matches_at(
    event: &Map<String, Value>,
    conditions: &Map<String, Value>,
    depth: usize,
) -> Result<bool, MatchError> {
    if depth > MAX_DEPTH {
        return Err(MatchError::DepthLimit { limit: MAX_DEPTH });
    }

    for (key, expected) in conditions {
        let Some(actual) = lookup(event, key) else {
            return Ok(false);
        };
        if !value_matches(actual, expected, depth)? {
            return Ok(false);
        }
    }

    Ok(true)
}

fn value_matches(actual: &Value, expected: &Value, depth: usize) -> Result<bool, MatchError> {
    match expected {
        // Any-of: the event value must equal one element.
        Value::Array(options) => Ok(options.iter().any(|opt| values_equal(actual, opt))),
        // Nested pattern: the event value must itself be a mapping.
        Value::Object(pattern) => match actual {
            Value::Object(inner) => matches_at(inner, pattern, depth + 1),
            _ => Ok(false),
        },
        _ => Ok(values_equal(actual, expected)),
    }
}

/// Scalar equality, tolerant of numeric/string encoding differences.
fn values_equal(a: &Value, b: &Value) -> bool {
    if a == b {
        return true;
    }
    if !is_scalar(a) || !is_scalar(b) {
        return false;
    }
    scalar_string(a) == scalar_string(b)
}

fn is_scalar(v: &Value) -> bool {
    matches!(v, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// Canonical string form of a scalar value.
pub(crate) fn scalar_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve a condition key in the event: direct first, then as a dotted
/// path into nested mappings.
fn lookup<'a>(event: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(v) = event.get(key) {
        return Some(v);
    }
    if !key.contains('.') {
        return None;
    }

    let mut segments = key.split('.');
    let mut current = event.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn empty_conditions_match_anything() {
        let event = map(json!({"author": "alice", "branch": "main"}));
        assert!(matches(&event, &Map::new()).unwrap());
        assert!(matches(&Map::new(), &Map::new()).unwrap());
    }

    #[test]
    fn missing_key_fails_closed() {
        let event = map(json!({"author": "alice"}));
        let conditions = map(json!({"branch": "main"}));
        assert!(!matches(&event, &conditions).unwrap());
    }

    #[test]
    fn scalar_equality() {
        let event = map(json!({"branch": "main", "count": 3}));
        assert!(matches(&event, &map(json!({"branch": "main"}))).unwrap());
        assert!(!matches(&event, &map(json!({"branch": "dev"}))).unwrap());
        assert!(matches(&event, &map(json!({"count": 3}))).unwrap());
    }

    #[test]
    fn numeric_string_encodings_are_normalized() {
        let event = map(json!({"pr": "42", "merged": true}));
        assert!(matches(&event, &map(json!({"pr": 42}))).unwrap());
        assert!(matches(&event, &map(json!({"merged": "true"}))).unwrap());
        assert!(!matches(&event, &map(json!({"pr": 43}))).unwrap());
    }

    /// Scenario: condition `{"author": ["alice", "bob"]}`.
    #[test]
    fn sequence_condition_means_any_of() {
        let conditions = map(json!({"author": ["alice", "bob"]}));
        assert!(matches(&map(json!({"author": "bob"})), &conditions).unwrap());
        assert!(!matches(&map(json!({"author": "carol"})), &conditions).unwrap());
    }

    #[test]
    fn nested_mapping_recurses() {
        let conditions = map(json!({"repo": {"branch": "main"}}));
        let event = map(json!({"repo": {"branch": "main", "name": "infra"}}));
        assert!(matches(&event, &conditions).unwrap());

        let wrong = map(json!({"repo": {"branch": "dev"}}));
        assert!(!matches(&wrong, &conditions).unwrap());

        // Event value is not a mapping at all.
        let scalar = map(json!({"repo": "main"}));
        assert!(!matches(&scalar, &conditions).unwrap());
    }

    #[test]
    fn dotted_path_reaches_nested_values() {
        let conditions = map(json!({"repo.branch": "main"}));
        let event = map(json!({"repo": {"branch": "main"}}));
        assert!(matches(&event, &conditions).unwrap());

        // A literal dotted key takes precedence over path traversal.
        let literal = map(json!({"repo.branch": "main"}));
        assert!(matches(&literal, &conditions).unwrap());
    }

    /// Adding unrelated event keys never turns a match into a non-match.
    #[test]
    fn matching_is_monotonic_under_added_attributes() {
        let conditions = map(json!({"author": "alice", "repo": {"branch": "main"}}));
        let mut event = map(json!({"author": "alice", "repo": {"branch": "main"}}));
        assert!(matches(&event, &conditions).unwrap());

        event.insert("unrelated".into(), json!({"deep": [1, 2, 3]}));
        event.insert("other".into(), json!("noise"));
        assert!(matches(&event, &conditions).unwrap());
    }

    #[test]
    fn array_event_value_does_not_match_scalar_condition() {
        let event = map(json!({"labels": ["a", "b"]}));
        assert!(!matches(&event, &map(json!({"labels": "a"}))).unwrap());
    }

    #[test]
    fn depth_limit_is_an_error_not_a_panic() {
        let mut cond = json!({"leaf": 1});
        let mut attrs = json!({"leaf": 1});
        for _ in 0..70 {
            cond = json!({ "n": cond });
            attrs = json!({ "n": attrs });
        }
        let err = matches(&map(attrs), &map(cond)).unwrap_err();
        assert!(matches!(err, MatchError::DepthLimit { .. }));
    }
}
