//! Common type definitions for the documentation core.
//!
//! This module provides the shared dictionary type used for free-form
//! resource payloads, plus tolerant accessors for walking nested JSON
//! values without ever failing on a malformed shape.

use serde_json::Value;

/// Dictionary data type for flexible key-value payloads.
///
/// Backed by the order-preserving JSON object map, so iteration always
/// follows the insertion order of the source document.
pub type DictData = serde_json::Map<String, Value>;

/// Get a nested object map under `key`, if present and well-shaped
pub fn get_map<'a>(value: &'a Value, key: &str) -> Option<&'a DictData> {
    value.get(key).and_then(Value::as_object)
}

/// Get a string field under `key`, if present and a string
pub fn get_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Get an integer field under `key`, coercing numeric strings
pub fn get_i64(value: &Value, key: &str) -> Option<i64> {
    value.get(key).and_then(convert::value_to_i64)
}

/// Get a boolean field under `key`, if present and a boolean
pub fn get_bool(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

/// Utility functions for value conversion
pub mod convert {
    use super::*;

    /// Convert Value to String
    pub fn value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => serde_json::to_string(value).unwrap_or_default(),
        }
    }

    /// Convert Value to bool
    pub fn value_to_bool(value: &Value) -> bool {
        match value {
            Value::Bool(b) => *b,
            Value::String(s) => s.to_lowercase() == "true",
            Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
            _ => false,
        }
    }

    /// Convert Value to i64
    pub fn value_to_i64(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}
