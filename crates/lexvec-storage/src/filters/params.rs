use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// Convert a filter value to an SQLite binding.
///
/// Booleans bind as 0/1, matching what `json_extract` yields for JSON
/// `true`/`false`. Lists and mappings bind as their JSON text.
pub fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_string()),
    }
}
