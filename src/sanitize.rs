//! Redaction of sensitive values in free-form action inputs.
//!
//! Sanitization walks arbitrarily nested input mappings and replaces any
//! value whose key looks sensitive with a fixed marker. Keys are matched by
//! lowercase substring against [`crate::defaults::SENSITIVE_KEY_MARKERS`].
//! Lists and scalars under non-sensitive keys pass through unchanged.

use serde_json::Value;

use crate::defaults::{REDACTION_MARKER, SENSITIVE_KEY_MARKERS};
use crate::types::DictData;

/// Check whether a key marks its value as sensitive
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_lowercase();
    SENSITIVE_KEY_MARKERS.iter().any(|marker| key.contains(marker))
}

/// Produce a sanitized copy of action inputs.
///
/// Non-mapping input yields an empty mapping, so the sanitized projection is
/// always an object.
pub fn sanitize_inputs(inputs: &Value) -> Value {
    match inputs.as_object() {
        Some(map) => Value::Object(sanitize_map(map)),
        None => Value::Object(DictData::new()),
    }
}

fn sanitize_map(map: &DictData) -> DictData {
    let mut sanitized = DictData::new();

    for (key, value) in map {
        if is_sensitive_key(key) {
            sanitized.insert(key.clone(), Value::String(REDACTION_MARKER.to_string()));
        } else if let Some(nested) = value.as_object() {
            sanitized.insert(key.clone(), Value::Object(sanitize_map(nested)));
        } else {
            sanitized.insert(key.clone(), value.clone());
        }
    }

    sanitized
}
