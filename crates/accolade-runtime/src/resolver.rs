//! Nested path resolution
//!
//! Walks a key path through a JSON-like event payload, fanning out over
//! arrays encountered along the way.

use accolade_core::Value;
use std::collections::VecDeque;

/// Resolve `path` against `event`, fanning out over arrays.
///
/// Traversal is breadth-first over a queue of (value, remaining keys)
/// branches. An array mid-path enqueues one branch per element. A key
/// missing anywhere aborts the entire resolution with `None`, even if other
/// branches would have succeeded; an empty result set is also reported as
/// `None`. Result order follows breadth-first expansion, not input order.
pub fn resolve_path<S: AsRef<str>>(event: &Value, path: &[S]) -> Option<Vec<Value>> {
    let mut queue: VecDeque<(&Value, &[S])> = VecDeque::new();
    queue.push_back((event, path));
    let mut results = Vec::new();

    while let Some((entry, keys)) = queue.pop_front() {
        let mut current = entry;
        let mut remaining = keys;
        loop {
            let (key, rest) = match remaining.split_first() {
                Some(split) => split,
                None => {
                    results.push(current.clone());
                    break;
                }
            };
            let fields = match current.as_object() {
                Some(fields) => fields,
                None => {
                    tracing::debug!(
                        key = key.as_ref(),
                        "path continues below a non-object value, aborting resolution"
                    );
                    return None;
                }
            };
            let next = match fields.get(key.as_ref()) {
                Some(value) => value,
                None => {
                    tracing::debug!(key = key.as_ref(), "key not found, aborting resolution");
                    return None;
                }
            };
            remaining = rest;
            if let Value::Array(items) = next {
                // Fan-out: one branch per element, current path consumed
                for item in items {
                    queue.push_back((item, remaining));
                }
                break;
            }
            current = next;
        }
    }

    if results.is_empty() {
        None
    } else {
        Some(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn path(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_resolve_scalar() {
        let e = event(serde_json::json!({"action": "opened"}));
        assert_eq!(
            resolve_path(&e, &path(&["action"])),
            Some(vec![Value::String("opened".to_string())])
        );
    }

    #[test]
    fn test_resolve_deep_nested() {
        let e = event(serde_json::json!({"repo": {"owner": {"login": "octo"}}}));
        assert_eq!(
            resolve_path(&e, &path(&["repo", "owner", "login"])),
            Some(vec![Value::String("octo".to_string())])
        );
    }

    #[test]
    fn test_missing_key_returns_none() {
        let e = event(serde_json::json!({"repo": {"owner": "octo"}}));
        assert_eq!(resolve_path(&e, &path(&["repo", "name"])), None);
        assert_eq!(resolve_path(&e, &path(&["absent"])), None);
    }

    #[test]
    fn test_fan_out_over_array() {
        let e = event(serde_json::json!({"a": [{"b": 1}, {"b": 2}]}));
        assert_eq!(
            resolve_path(&e, &path(&["a", "b"])),
            Some(vec![Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_fan_out_missing_in_one_branch_aborts_all() {
        // All-or-nothing: the second element lacks "b", so the whole
        // resolution fails even though the first element has it
        let e = event(serde_json::json!({"a": [{"b": 1}, {"c": 2}]}));
        assert_eq!(resolve_path(&e, &path(&["a", "b"])), None);
    }

    #[test]
    fn test_nested_fan_out_breadth_first_order() {
        let e = event(serde_json::json!({
            "prs": [
                {"labels": [{"name": "bug"}, {"name": "ui"}]},
                {"labels": [{"name": "docs"}]}
            ]
        }));
        assert_eq!(
            resolve_path(&e, &path(&["prs", "labels", "name"])),
            Some(vec![
                Value::String("bug".to_string()),
                Value::String("ui".to_string()),
                Value::String("docs".to_string()),
            ])
        );
    }

    #[test]
    fn test_array_at_leaf_yields_elements() {
        let e = event(serde_json::json!({"tags": ["a", "b"]}));
        assert_eq!(
            resolve_path(&e, &path(&["tags"])),
            Some(vec![
                Value::String("a".to_string()),
                Value::String("b".to_string()),
            ])
        );
    }

    #[test]
    fn test_empty_array_fan_out_returns_none() {
        // Zero fanned-out branches leave the result set empty, which is
        // indistinguishable from a missing key
        let e = event(serde_json::json!({"a": []}));
        assert_eq!(resolve_path(&e, &path(&["a"])), None);
        assert_eq!(resolve_path(&e, &path(&["a", "b"])), None);
    }

    #[test]
    fn test_path_through_scalar_returns_none() {
        let e = event(serde_json::json!({"count": 3}));
        assert_eq!(resolve_path(&e, &path(&["count", "value"])), None);
    }
}
