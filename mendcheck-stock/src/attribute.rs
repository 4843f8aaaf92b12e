use serde::Serialize;
use serde_json::Value;

/// Look up a top-level attribute of a serialized subject.
///
/// Returns `None` when the subject does not serialize to an object or has no
/// such attribute.
pub(crate) fn lookup<T: Serialize + ?Sized>(subject: &T, property: &str) -> Option<Value> {
    match serde_json::to_value(subject) {
        Ok(Value::Object(mut map)) => map.remove(property),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(property, error = %e, "subject did not serialize");
            None
        }
    }
}

/// Length of a string (in characters) or an array (in items).
pub(crate) fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
