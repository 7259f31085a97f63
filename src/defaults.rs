//! Default values and fixed markers used across the documentation core.

/// Marker written in place of any sanitized input value
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Key substrings (lowercase) that mark an input value as sensitive
pub const SENSITIVE_KEY_MARKERS: [&str; 6] = [
    "authentication",
    "password",
    "secret",
    "key",
    "token",
    "sig",
];

/// Maximum number of characters shown for URIs and paths in descriptions
pub const DISPLAY_TRUNCATE_CHARS: usize = 50;

/// Scan-round multiplier for the action ordering loop (cap = factor x actions)
pub const ORDERING_ROUND_FACTOR: usize = 2;

/// Version stamp written into aggregate metadata
pub const METADATA_VERSION: &str = "1.0";
