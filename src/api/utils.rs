//! Request-body helpers
//!
//! Bodies arrive as raw JSON values and are validated field by field at the
//! boundary, so missing or malformed fields come back as 400s with readable
//! messages instead of a framework rejection. Numeric fields accept either a
//! JSON number or a numeric string.

use serde_json::Value;

/// Extract a non-empty string field.
pub fn get_str(body: &Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Coerce a JSON value to a float (number or numeric string).
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
