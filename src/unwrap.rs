//! Envelope handling for Chargify payloads.
//!
//! Chargify wraps records in an object keyed by the resource name
//! (`{"customer": {...}}`), and list endpoints return arrays of such objects.
//! The API has not always been consistent about this, so unwrapping is
//! best-effort: a missing tag yields the value unchanged.

use serde_json::{Map, Value};

/// Unwraps a decoded response by its resource tag.
///
/// - No tag: the value is returned unchanged.
/// - Array: each element is replaced by `element[tag]` when present.
/// - Object: `value[tag]` when present and truthy, otherwise the object.
/// - `null` is treated as an empty object.
///
/// Applying it again to an already unwrapped value returns the same value.
///
/// # Examples
///
/// ```
/// use chargify_api::unwrap::unwrap;
/// use serde_json::json;
///
/// let body = json!({"customer": {"id": 1}});
/// assert_eq!(unwrap(body, Some("customer")), json!({"id": 1}));
///
/// let list = json!([{"customer": {"id": 1}}, {"id": 2}]);
/// assert_eq!(unwrap(list, Some("customer")), json!([{"id": 1}, {"id": 2}]));
/// ```
pub fn unwrap(value: Value, tag: Option<&str>) -> Value {
    let Some(tag) = tag else {
        return value;
    };

    match value {
        Value::Null => Value::Object(Map::new()),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| take_field(item, tag, |_| true))
                .collect(),
        ),
        other => take_field(other, tag, is_truthy),
    }
}

/// Wraps an outgoing body in its resource envelope.
///
/// Bodies that are already enveloped (an object whose only key is `tag`) and
/// non-object bodies are returned as-is.
pub fn envelope(body: Value, tag: &str) -> Value {
    match body {
        Value::Object(ref map) if map.len() == 1 && map.contains_key(tag) => body,
        Value::Object(_) => {
            let mut map = Map::new();
            map.insert(tag.to_string(), body);
            Value::Object(map)
        }
        other => other,
    }
}

fn take_field(value: Value, tag: &str, accept: fn(&Value) -> bool) -> Value {
    match value {
        Value::Object(mut map) => match map.remove(tag) {
            Some(inner) if accept(&inner) => inner,
            Some(inner) => {
                map.insert(tag.to_string(), inner);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// What an empty response body looks like after unwrapping: `null` or `{}`.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
