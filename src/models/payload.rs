//! Helpers for inspecting decoded API payloads.

use serde_json::Value;

/// Truthiness of a decoded payload.
///
/// `null`, `false`, `0`, `""`, `"0"` and empty arrays are falsy. Objects are
/// always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Decode a response body, treating anything that isn't JSON as `null`.
pub fn decode_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}

/// The `error` field an endpoint reports failures in, rendered as text.
pub fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The sub-document addressed by `set`.
pub fn extract_set(payload: Value, set: &str) -> Option<Value> {
    match payload {
        Value::Object(mut map) => map.remove(set),
        _ => None,
    }
}
