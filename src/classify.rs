//! Heuristic classification of workflow nodes and service backends.
//!
//! Known trigger, action, connector, and backend kinds are modeled as sum
//! types with an explicit fallback arm, so every type tag maps to a
//! still-useful label even when it was never seen before. Descriptions are
//! one-line summaries aimed at as-built documentation, not a faithful
//! rendering of every input field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::DISPLAY_TRUNCATE_CHARS;
use crate::parser::DataSourceDoc;
use crate::types::{get_i64, get_map, get_str};
use crate::utils::{contains_ci, last_path_segment, truncate_display};
use crate::workflow::{ActionSpec, TriggerSpec};

/// Known trigger kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    /// HTTP request trigger
    Request,
    /// Scheduled recurrence trigger
    Recurrence,
    /// Managed connector event trigger
    ApiConnection,
    /// Any other trigger type
    Other,
}

impl TriggerKind {
    /// Classify a trigger type tag
    pub fn from_type(trigger_type: &str) -> Self {
        match trigger_type {
            "Request" => TriggerKind::Request,
            "Recurrence" => TriggerKind::Recurrence,
            "ApiConnection" => TriggerKind::ApiConnection,
            _ => TriggerKind::Other,
        }
    }
}

/// Known action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Response,
    Compose,
    ParseJson,
    Condition,
    ForEach,
    Switch,
    Scope,
    InitializeVariable,
    SetVariable,
    AppendToArrayVariable,
    Http,
    ApiConnection,
    /// Any other action type
    Other,
}

impl ActionKind {
    /// Classify an action type tag
    pub fn from_type(action_type: &str) -> Self {
        match action_type {
            "Response" => ActionKind::Response,
            "Compose" => ActionKind::Compose,
            "ParseJson" => ActionKind::ParseJson,
            "Condition" => ActionKind::Condition,
            "ForEach" => ActionKind::ForEach,
            "Switch" => ActionKind::Switch,
            "Scope" => ActionKind::Scope,
            "InitializeVariable" => ActionKind::InitializeVariable,
            "SetVariable" => ActionKind::SetVariable,
            "AppendToArrayVariable" => ActionKind::AppendToArrayVariable,
            "Http" => ActionKind::Http,
            "ApiConnection" => ActionKind::ApiConnection,
            _ => ActionKind::Other,
        }
    }
}

/// Backend kinds inferred from an API service URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    /// Logic App Standard site (`*.azurewebsites.net`)
    LogicAppStandard,
    /// Logic App Consumption endpoint (`*.logic.azure.com`)
    LogicAppConsumption,
    /// API Management backend (`*.azure-api.net`)
    ApimBackend,
    /// Anything else
    External,
}

static STANDARD_SITE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://([^.]+)\.azurewebsites\.net").expect("site host pattern is valid")
});

impl BackendKind {
    /// Infer the backend kind from a service URL
    pub fn from_service_url(url: &str) -> Self {
        if url.contains("azurewebsites.net") {
            BackendKind::LogicAppStandard
        } else if url.contains("logic.azure.com") {
            BackendKind::LogicAppConsumption
        } else if url.contains("azure-api.net") {
            BackendKind::ApimBackend
        } else {
            BackendKind::External
        }
    }

    /// Human-readable backend label
    pub fn label(&self) -> &'static str {
        match self {
            BackendKind::LogicAppStandard => "Logic App Standard",
            BackendKind::LogicAppConsumption => "Logic App Consumption",
            BackendKind::ApimBackend => "APIM Backend",
            BackendKind::External => "External",
        }
    }
}

/// Extract the site name from a Logic App Standard service URL
pub fn standard_site_name(url: &str) -> Option<String> {
    STANDARD_SITE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Generate a one-line description for a trigger
pub fn describe_trigger(trigger: &TriggerSpec) -> String {
    match TriggerKind::from_type(&trigger.trigger_type) {
        TriggerKind::Request => {
            let method = get_str(&trigger.inputs, "method").unwrap_or("POST");
            format!("HTTP {} Request - Receives incoming API calls", method)
        }
        TriggerKind::Recurrence => {
            let (frequency, interval) = trigger
                .recurrence
                .as_ref()
                .map(|rec| {
                    (
                        rec.frequency.as_deref().unwrap_or("Day"),
                        rec.interval.unwrap_or(1),
                    )
                })
                .unwrap_or(("Day", 1));
            format!(
                "Scheduled - Runs every {} {}(s)",
                interval,
                frequency.to_lowercase()
            )
        }
        TriggerKind::ApiConnection => {
            "API Connection - Triggered by external service event".to_string()
        }
        TriggerKind::Other => format!("{} trigger", trigger.trigger_type),
    }
}

/// Generate a one-line description for an action
pub fn describe_action(action: &ActionSpec) -> String {
    let inputs = &action.inputs;

    match ActionKind::from_type(&action.action_type) {
        ActionKind::Response => {
            let status = get_i64(inputs, "statusCode").unwrap_or(200);
            format!("Return HTTP {} response", status)
        }
        ActionKind::Compose => "Transform/compose data".to_string(),
        ActionKind::ParseJson => "Parse JSON content".to_string(),
        ActionKind::Condition => "Conditional branch (If/Then/Else)".to_string(),
        ActionKind::ForEach => "Loop through collection".to_string(),
        ActionKind::Switch => "Switch/case evaluation".to_string(),
        ActionKind::Scope => "Grouped actions scope".to_string(),
        ActionKind::InitializeVariable => "Initialize variable".to_string(),
        ActionKind::SetVariable => "Set variable value".to_string(),
        ActionKind::AppendToArrayVariable => "Append to array".to_string(),
        ActionKind::Http => {
            let method = get_str(inputs, "method").unwrap_or("GET");
            let uri = get_str(inputs, "uri").unwrap_or("external service");
            format!(
                "HTTP {} call to {}",
                method,
                truncate_display(uri, DISPLAY_TRUNCATE_CHARS)
            )
        }
        ActionKind::ApiConnection => describe_api_connection(inputs),
        ActionKind::Other => format!("{} action", action.action_type),
    }
}

/// Describe a managed connector action from its host metadata
fn describe_api_connection(inputs: &Value) -> String {
    let api_id = get_map(inputs, "host")
        .and_then(|host| host.get("apiId"))
        .and_then(Value::as_str)
        .unwrap_or("");
    let path = get_str(inputs, "path").unwrap_or("");
    let method = get_str(inputs, "method").unwrap_or("");

    if contains_ci(api_id, "sql") {
        let path_lower = path.to_lowercase();
        if path_lower.contains("executestoredprocedure") {
            let procedure = last_path_segment(path).unwrap_or("stored procedure");
            return format!("Execute SQL stored procedure: {}", procedure);
        }
        if path_lower.contains("executequery") {
            return "Execute SQL query".to_string();
        }
        return "SQL Server operation".to_string();
    }

    if contains_ci(api_id, "office365") {
        return "Office 365 operation".to_string();
    }

    if contains_ci(api_id, "keyvault") {
        return "Key Vault secret operation".to_string();
    }

    let target = if path.is_empty() {
        "operation".to_string()
    } else {
        truncate_display(path, DISPLAY_TRUNCATE_CHARS)
    };
    format!("API Connection: {} {}", method, target)
}

/// Extract the connection reference name from an action, if present.
///
/// Returns `None` when any intermediate level is missing or not a mapping.
pub fn extract_connection(action: &ActionSpec) -> Option<String> {
    get_map(&action.inputs, "host")
        .and_then(|host| host.get("connection"))
        .and_then(|connection| get_str(connection, "referenceName"))
        .map(str::to_string)
}

/// Identify whether an action touches a known data backend
pub fn identify_data_source(action: &ActionSpec) -> Option<DataSourceDoc> {
    let api_id = get_map(&action.inputs, "host")
        .and_then(|host| host.get("apiId"))
        .and_then(Value::as_str)
        .unwrap_or("");

    if contains_ci(api_id, "sql") {
        let operation = match get_str(&action.inputs, "path") {
            Some(path) if !path.is_empty() => {
                last_path_segment(path).unwrap_or(path).to_string()
            }
            _ => "query".to_string(),
        };
        return Some(DataSourceDoc {
            source_type: "SQL Server".to_string(),
            action_type: action.action_type.clone(),
            operation: Some(operation),
        });
    }

    if contains_ci(api_id, "sharepointonline") {
        return Some(DataSourceDoc {
            source_type: "SharePoint Online".to_string(),
            action_type: action.action_type.clone(),
            operation: None,
        });
    }

    if contains_ci(api_id, "azureblob") {
        return Some(DataSourceDoc {
            source_type: "Azure Blob Storage".to_string(),
            action_type: action.action_type.clone(),
            operation: None,
        });
    }

    None
}
