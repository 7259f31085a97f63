//! Configuration layer for the documentation core.
//!
//! Settings come from three sources, later ones winning: built-in defaults,
//! an optional `config.yaml` found on the configured search paths, and
//! environment variables. The configuration carries documentation metadata
//! defaults (service name, environment, subscription) and shared
//! infrastructure records that are typically static per estate.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};

/// Main configuration for documentation runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search paths for `config.yaml`
    pub config_paths: Vec<PathBuf>,

    /// Metadata defaults applied to new aggregators
    pub metadata: MetadataConfig,

    /// Shared infrastructure defaults applied to new aggregators
    pub shared_infrastructure: SharedInfraConfig,
}

/// Documentation metadata defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub service_name: Option<String>,
    pub environment: Option<String>,
    pub subscription: Option<String>,
}

/// Shared infrastructure defaults (free-form records)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedInfraConfig {
    pub front_door: Option<Value>,
    pub waf: Option<Value>,
}

/// Partial configuration as read from `config.yaml`
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    metadata: Option<MetadataConfig>,

    #[serde(default)]
    shared_infrastructure: Option<SharedInfraConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_paths: vec![PathBuf::from("./configs"), PathBuf::from("/etc/azdoc")],
            metadata: MetadataConfig::default(),
            shared_infrastructure: SharedInfraConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, files, and environment variables
    pub fn load() -> ConfigResult<Self> {
        let mut config = Self::default();

        // Environment decides the search paths before files are read
        config.load_paths_from_env();
        config.load_from_files()?;
        config.load_from_env();

        config.validate()?;
        Ok(config)
    }

    fn load_paths_from_env(&mut self) {
        if let Ok(paths) = env::var("AZDOC_CONFIG_PATH") {
            self.config_paths = paths.split(':').map(PathBuf::from).collect();
        }
    }

    /// Apply environment variable overrides
    fn load_from_env(&mut self) {
        if let Ok(service_name) = env::var("AZDOC_SERVICE_NAME") {
            self.metadata.service_name = Some(service_name);
        }

        if let Ok(environment) = env::var("AZDOC_ENVIRONMENT") {
            self.metadata.environment = Some(environment);
        }

        if let Ok(subscription) = env::var("AZDOC_SUBSCRIPTION") {
            self.metadata.subscription = Some(subscription);
        }
    }

    /// Merge settings from the first `config.yaml` found on the search paths
    fn load_from_files(&mut self) -> ConfigResult<()> {
        for config_path in &self.config_paths.clone() {
            let config_file = config_path.join("config.yaml");
            if !config_file.exists() {
                continue;
            }

            let content = std::fs::read_to_string(&config_file)?;
            let file_config: FileConfig = serde_yaml::from_str(&content)?;
            self.merge(file_config);
            return Ok(());
        }

        Ok(())
    }

    /// Merge file settings into this configuration
    fn merge(&mut self, other: FileConfig) {
        if let Some(metadata) = other.metadata {
            if metadata.service_name.is_some() {
                self.metadata.service_name = metadata.service_name;
            }
            if metadata.environment.is_some() {
                self.metadata.environment = metadata.environment;
            }
            if metadata.subscription.is_some() {
                self.metadata.subscription = metadata.subscription;
            }
        }

        if let Some(shared) = other.shared_infrastructure {
            if shared.front_door.is_some() {
                self.shared_infrastructure.front_door = shared.front_door;
            }
            if shared.waf.is_some() {
                self.shared_infrastructure.waf = shared.waf;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.config_paths.is_empty() {
            return Err(ConfigError::Validation {
                message: "at least one config path is required".to_string(),
            });
        }

        if let Some(service_name) = &self.metadata.service_name {
            if service_name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    message: "service_name must not be empty".to_string(),
                });
            }
        }

        if let Some(environment) = &self.metadata.environment {
            if environment.trim().is_empty() {
                return Err(ConfigError::Validation {
                    message: "environment must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.config_paths.len(), 2);
        assert!(config.metadata.service_name.is_none());
        assert!(config.shared_infrastructure.front_door.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("AZDOC_SERVICE_NAME", "orders");
        env::set_var("AZDOC_ENVIRONMENT", "prod");

        let mut config = Config::default();
        config.load_from_env();

        assert_eq!(config.metadata.service_name.as_deref(), Some("orders"));
        assert_eq!(config.metadata.environment.as_deref(), Some("prod"));

        env::remove_var("AZDOC_SERVICE_NAME");
        env::remove_var("AZDOC_ENVIRONMENT");
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.metadata.environment = Some("  ".to_string());
        assert!(config.validate().is_err());

        config.metadata.environment = Some("prod".to_string());
        assert!(config.validate().is_ok());

        config.config_paths.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_merge() {
        let yaml = r#"
metadata:
  service_name: orders
shared_infrastructure:
  front_door:
    sku: Standard_AzureFrontDoor
"#;
        let file_config: FileConfig = serde_yaml::from_str(yaml).unwrap();

        let mut config = Config::default();
        config.metadata.subscription = Some("sub-001".to_string());
        config.merge(file_config);

        assert_eq!(config.metadata.service_name.as_deref(), Some("orders"));
        // Values absent from the file stay untouched
        assert_eq!(config.metadata.subscription.as_deref(), Some("sub-001"));
        assert!(config.shared_infrastructure.front_door.is_some());
    }
}
