//! Error types for the documentation core.
//!
//! Only the configuration layer can fail: the parser, renderer, and
//! aggregator absorb malformed input locally and always produce a result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading and validation
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Configuration parse error: {message}")]
    Parse { message: String },

    #[error("Configuration validation error: {message}")]
    Validation { message: String },

    #[error("Invalid environment variable {var}: {message}")]
    EnvVar { var: String, message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse {
            message: format!("YAML error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::Validation {
            message: "environment must not be empty".to_string(),
        };
        assert!(error.to_string().contains("environment must not be empty"));
    }

    #[test]
    fn test_error_serialization() {
        let error = ConfigError::Parse {
            message: "bad yaml".to_string(),
        };

        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: ConfigError = serde_json::from_str(&serialized).unwrap();

        match deserialized {
            ConfigError::Parse { message } => assert_eq!(message, "bad yaml"),
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_io_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);

        match error {
            ConfigError::Io { message } => assert!(message.contains("file not found")),
            _ => panic!("Wrong error type"),
        }
    }
}
