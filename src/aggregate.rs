//! Configuration aggregation across Azure resource categories.
//!
//! The [`ConfigurationAggregator`] owns a mutable aggregate tree with a
//! fixed top-level shape (`metadata`, `shared_infrastructure`, `service`)
//! and exposes one add-operation per resource category. Each operation is a
//! direct tolerant field re-mapping from the category's raw payload into a
//! typed record: missing fields become `None`, never errors. Categories are
//! independent; each add overwrites only its own slot.
//!
//! The workflow category is the one exception with real logic: it delegates
//! to [`WorkflowParser`] and stores the parsed record next to its rendered
//! markdown document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::classify::{standard_site_name, BackendKind};
use crate::config::Config;
use crate::defaults::METADATA_VERSION;
use crate::parser::{ParsedWorkflow, WorkflowParser};
use crate::render::render_markdown;
use crate::types::{convert, get_bool, get_i64, get_map, get_str};

/// Documentation run metadata
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    /// Timestamp of the documentation run
    pub collection_date: DateTime<Utc>,

    /// Aggregate schema version
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
}

/// Shared infrastructure records (typically static per estate)
#[derive(Debug, Clone, Default, Serialize)]
pub struct SharedInfrastructure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_door: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub waf: Option<Value>,
}

/// Per-category service records; absent categories are omitted on export
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apim: Option<ApimConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logic_app: Option<LogicAppConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<ConnectionRecord>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_gateway: Option<DataGatewayConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_vault: Option<KeyVaultConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_insights: Option<AppInsightsConfig>,
}

/// API Management instance record
#[derive(Debug, Clone, Serialize)]
pub struct ApimConfig {
    pub resource_name: Option<String>,
    pub resource_group: Option<String>,
    pub region: Option<String>,
    pub sku: Option<String>,
    pub capacity: Option<i64>,
    pub gateway_url: Option<String>,
    pub developer_portal_url: Option<String>,
    pub virtual_network_type: Option<String>,
    pub identity: IdentityConfig,
}

/// Managed identity record
#[derive(Debug, Clone, Default, Serialize)]
pub struct IdentityConfig {
    #[serde(rename = "type")]
    pub identity_type: Option<String>,
    pub principal_id: Option<String>,
}

/// Published API record
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub path: Option<String>,
    pub service_url: Option<String>,
    pub protocols: Option<Value>,
    pub subscription_required: Option<bool>,
    pub api_version: Option<String>,
    pub operations: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_type: Option<BackendRef>,
}

/// Backend inferred from an API's service URL
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BackendRef {
    #[serde(rename = "type")]
    pub backend_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Logic App resource record
#[derive(Debug, Clone, Serialize)]
pub struct LogicAppConfig {
    pub resource_name: Option<String>,
    pub resource_group: Option<String>,

    #[serde(rename = "type")]
    pub kind: String,

    pub region: Option<String>,
    pub state: Option<String>,
    pub identity: Value,
}

/// Parsed and rendered workflow record
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowRecord {
    pub name: String,
    pub parsed: ParsedWorkflow,
    pub markdown: String,
}

/// API connection record
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionRecord {
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub api_name: Option<String>,

    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_server: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Value>,
}

/// On-premises data gateway record
#[derive(Debug, Clone, Serialize)]
pub struct DataGatewayConfig {
    pub name: Option<String>,
    pub resource_group: Option<String>,
    pub region: Option<String>,

    #[serde(rename = "type")]
    pub installation_name: Option<String>,

    pub machine_name: Option<String>,
}

/// Key Vault record
#[derive(Debug, Clone, Serialize)]
pub struct KeyVaultConfig {
    pub name: Option<String>,
    pub resource_group: Option<String>,
    pub region: Option<String>,
    pub sku: Option<String>,
    pub vault_uri: Option<String>,
    pub soft_delete_enabled: Option<bool>,
    pub purge_protection: Option<bool>,
    pub secrets: Vec<SecretRef>,
}

/// Key Vault secret reference (metadata only, never the value)
#[derive(Debug, Clone, Serialize)]
pub struct SecretRef {
    pub name: Option<String>,
    pub enabled: Option<bool>,
}

/// Application Insights record
#[derive(Debug, Clone, Serialize)]
pub struct AppInsightsConfig {
    pub name: Option<String>,
    pub resource_group: Option<String>,
    pub region: Option<String>,
    pub instrumentation_key: Option<String>,
    pub connection_string: Option<String>,
    pub workspace_id: Option<String>,
    pub retention_days: Option<i64>,
}

/// Full aggregate configuration tree
#[derive(Debug, Clone, Serialize)]
pub struct AggregateConfig {
    pub metadata: Metadata,
    pub shared_infrastructure: SharedInfrastructure,
    pub service: ServiceConfig,
}

/// Aggregates per-category configuration into a single exportable tree
#[derive(Debug, Clone)]
pub struct ConfigurationAggregator {
    config: AggregateConfig,
}

impl ConfigurationAggregator {
    /// Create a new aggregator with a timestamped, otherwise empty tree
    pub fn new() -> Self {
        Self {
            config: AggregateConfig {
                metadata: Metadata {
                    collection_date: Utc::now(),
                    version: METADATA_VERSION.to_string(),
                    service_name: None,
                    environment: None,
                    subscription: None,
                },
                shared_infrastructure: SharedInfrastructure::default(),
                service: ServiceConfig::default(),
            },
        }
    }

    /// Create an aggregator seeded with metadata and shared-infrastructure
    /// defaults from the configuration layer
    pub fn with_config(config: &Config) -> Self {
        let mut aggregator = Self::new();
        aggregator.config.metadata.service_name = config.metadata.service_name.clone();
        aggregator.config.metadata.environment = config.metadata.environment.clone();
        aggregator.config.metadata.subscription = config.metadata.subscription.clone();
        aggregator.config.shared_infrastructure.front_door =
            config.shared_infrastructure.front_door.clone();
        aggregator.config.shared_infrastructure.waf = config.shared_infrastructure.waf.clone();
        aggregator
    }

    /// Set documentation metadata
    pub fn set_metadata(&mut self, service_name: &str, environment: &str, subscription: &str) {
        self.config.metadata.service_name = Some(service_name.to_string());
        self.config.metadata.environment = Some(environment.to_string());
        self.config.metadata.subscription = Some(subscription.to_string());
    }

    /// Add API Management configuration
    pub fn add_apim_config(&mut self, data: &Value) {
        let sku = get_map(data, "sku");
        let identity = get_map(data, "identity");

        self.config.service.apim = Some(ApimConfig {
            resource_name: opt_str(data, "name"),
            resource_group: opt_str(data, "resourceGroup"),
            region: opt_str(data, "location"),
            sku: sku.and_then(|s| s.get("name")).and_then(Value::as_str).map(str::to_string),
            capacity: sku.and_then(|s| s.get("capacity")).and_then(convert::value_to_i64),
            gateway_url: opt_str(data, "gatewayUrl"),
            developer_portal_url: opt_str(data, "developerPortalUrl"),
            virtual_network_type: opt_str(data, "virtualNetworkType"),
            identity: IdentityConfig {
                identity_type: identity
                    .and_then(|i| i.get("type"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                principal_id: identity
                    .and_then(|i| i.get("principalId"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
        });
    }

    /// Add published API configuration, inferring the backend from its
    /// service URL
    pub fn add_api_config(&mut self, data: &Value) {
        let service_url = get_str(data, "serviceUrl").unwrap_or("");
        let backend_type = if service_url.is_empty() {
            None
        } else {
            Some(identify_backend(service_url))
        };

        self.config.service.api = Some(ApiConfig {
            name: opt_str(data, "name"),
            display_name: opt_str(data, "displayName"),
            path: opt_str(data, "path"),
            service_url: opt_str(data, "serviceUrl"),
            protocols: data.get("protocols").cloned(),
            subscription_required: get_bool(data, "subscriptionRequired"),
            api_version: opt_str(data, "apiVersion"),
            operations: data
                .get("operations")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            backend_type,
        });
    }

    /// Add Logic App resource configuration
    pub fn add_logic_app_config(&mut self, data: &Value) {
        self.config.service.logic_app = Some(LogicAppConfig {
            resource_name: opt_str(data, "name"),
            resource_group: opt_str(data, "resourceGroup"),
            kind: get_str(data, "kind").unwrap_or("Standard").to_string(),
            region: opt_str(data, "location"),
            state: opt_str(data, "state"),
            identity: data
                .get("identity")
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
        });
    }

    /// Parse a workflow definition and store it with its rendered document
    pub fn add_workflow_config(&mut self, definition: &Value, workflow_name: &str) {
        let parsed = WorkflowParser::parse_value(definition);
        let markdown = render_markdown(&parsed, workflow_name);

        tracing::debug!(
            workflow = workflow_name,
            actions = parsed.actions.len(),
            "stored parsed workflow configuration"
        );

        self.config.service.workflow = Some(WorkflowRecord {
            name: workflow_name.to_string(),
            parsed,
            markdown,
        });
    }

    /// Add API connection configurations
    pub fn add_connection_config(&mut self, connections: &[Value]) {
        let records = connections
            .iter()
            .map(|connection| {
                let status = match connection.get("statuses").and_then(Value::as_array) {
                    Some(statuses) if !statuses.is_empty() => {
                        get_str(&statuses[0], "status").map(str::to_string)
                    }
                    _ => Some("Unknown".to_string()),
                };

                let params = connection
                    .get("parameterValues")
                    .cloned()
                    .unwrap_or(Value::Null);
                let gateway = non_null(params.get("gateway"));
                let sql_server = non_null(params.get("server"));
                let database = if sql_server.is_some() {
                    non_null(params.get("database"))
                } else {
                    None
                };

                ConnectionRecord {
                    name: opt_str(connection, "name"),
                    api_name: get_map(connection, "api")
                        .and_then(|api| api.get("name"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    status,
                    gateway,
                    sql_server,
                    database,
                }
            })
            .collect();

        self.config.service.connections = Some(records);
    }

    /// Add on-premises data gateway configuration
    pub fn add_data_gateway_config(&mut self, data: &Value) {
        let installation = get_map(data, "properties")
            .and_then(|props| props.get("connectionGatewayInstallation"));

        self.config.service.data_gateway = Some(DataGatewayConfig {
            name: opt_str(data, "name"),
            resource_group: opt_str(data, "resourceGroup"),
            region: opt_str(data, "location"),
            installation_name: installation
                .and_then(|i| get_str(i, "name"))
                .map(str::to_string),
            machine_name: installation
                .and_then(|i| get_str(i, "machineName"))
                .map(str::to_string),
        });
    }

    /// Add Key Vault configuration with its secret references
    pub fn add_keyvault_config(&mut self, data: &Value, secrets: &[Value]) {
        let properties = data.get("properties").cloned().unwrap_or(Value::Null);

        self.config.service.key_vault = Some(KeyVaultConfig {
            name: opt_str(data, "name"),
            resource_group: opt_str(data, "resourceGroup"),
            region: opt_str(data, "location"),
            sku: get_map(&properties, "sku")
                .and_then(|sku| sku.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string),
            vault_uri: opt_str(&properties, "vaultUri"),
            soft_delete_enabled: get_bool(&properties, "enableSoftDelete"),
            purge_protection: get_bool(&properties, "enablePurgeProtection"),
            secrets: secrets
                .iter()
                .map(|secret| SecretRef {
                    name: opt_str(secret, "name"),
                    enabled: get_bool(secret, "enabled"),
                })
                .collect(),
        });
    }

    /// Add Application Insights configuration
    pub fn add_app_insights_config(&mut self, data: &Value) {
        let properties = data.get("properties").cloned().unwrap_or(Value::Null);

        self.config.service.app_insights = Some(AppInsightsConfig {
            name: opt_str(data, "name"),
            resource_group: opt_str(data, "resourceGroup"),
            region: opt_str(data, "location"),
            instrumentation_key: opt_str(&properties, "InstrumentationKey"),
            connection_string: opt_str(&properties, "ConnectionString"),
            workspace_id: opt_str(&properties, "WorkspaceResourceId"),
            retention_days: get_i64(&properties, "RetentionInDays"),
        });
    }

    /// Set shared infrastructure records; `None` leaves the current value
    pub fn set_shared_infrastructure(&mut self, front_door: Option<Value>, waf: Option<Value>) {
        if front_door.is_some() {
            self.config.shared_infrastructure.front_door = front_door;
        }
        if waf.is_some() {
            self.config.shared_infrastructure.waf = waf;
        }
    }

    /// Borrow the complete aggregate tree
    pub fn config(&self) -> &AggregateConfig {
        &self.config
    }

    /// Consume the aggregator, returning the aggregate tree
    pub fn into_config(self) -> AggregateConfig {
        self.config
    }

    /// Serialize the aggregate tree for an external exporter
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.config).unwrap_or_else(|_| Value::Null)
    }
}

impl Default for ConfigurationAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Infer a backend record from an API service URL
fn identify_backend(url: &str) -> BackendRef {
    let kind = BackendKind::from_service_url(url);
    let name = match kind {
        BackendKind::LogicAppStandard => {
            Some(standard_site_name(url).unwrap_or_else(|| "Unknown".to_string()))
        }
        _ => None,
    };

    BackendRef {
        backend_type: kind.label().to_string(),
        name,
    }
}

fn opt_str(value: &Value, key: &str) -> Option<String> {
    get_str(value, key).map(str::to_string)
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}
