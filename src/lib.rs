//! # azdoc - Azure As-Built Documentation Core
//!
//! This crate converts declarative Azure resource definitions (API Management,
//! Logic Apps, workflow JSON, connections, Key Vault, gateways, telemetry)
//! into a unified configuration model and renders workflow execution graphs
//! into human-readable markdown documentation.
//!
//! ## Key Features
//!
//! - **Workflow definition parsing** - Turn a graph-shaped Logic App workflow
//!   definition into a deterministic linear execution order
//! - **Heuristic classification** - One-line semantic descriptions for known
//!   trigger, action, and connector kinds with a generic fallback
//! - **Redaction-aware projection** - Recursive sanitization of action inputs
//!   safe for publication
//! - **Markdown rendering** - Deterministic, table-oriented documentation
//!   output per workflow
//! - **Configuration aggregation** - One normalized record per resource
//!   category collected into a single exportable tree
//! - **Graceful degradation** - Malformed or cyclic definitions never abort a
//!   documentation pass
//!
//! ## Quick Start
//!
//! ```rust
//! use azdoc::{render_markdown, WorkflowParser};
//! use serde_json::json;
//!
//! let definition = json!({
//!     "triggers": {
//!         "manual": { "type": "Request", "kind": "Http", "inputs": { "method": "POST" } }
//!     },
//!     "actions": {
//!         "Parse_Request": { "type": "ParseJson", "runAfter": {} },
//!         "Send_Response": {
//!             "type": "Response",
//!             "runAfter": { "Parse_Request": ["Succeeded"] },
//!             "inputs": { "statusCode": 200 }
//!         }
//!     }
//! });
//!
//! let parsed = WorkflowParser::parse_value(&definition);
//! assert_eq!(parsed.actions.len(), 2);
//!
//! let document = render_markdown(&parsed, "Sample API Workflow");
//! assert!(document.contains("### Workflow Actions (Execution Order)"));
//! ```
//!
//! ## Architecture
//!
//! The documentation core is built around a few concepts:
//!
//! - **WorkflowDefinition**: Raw trigger/action model read tolerantly from
//!   already-parsed JSON
//! - **WorkflowParser**: Pure transformation into a [`parser::ParsedWorkflow`]
//!   record (ordering, classification, sanitization)
//! - **Renderer**: Deterministic markdown projection of a parsed workflow
//! - **ConfigurationAggregator**: Mutable aggregate tree accepting one typed
//!   add-operation per resource category
//! - **Config**: Environment and file based defaults for metadata and shared
//!   infrastructure
//!
//! Every parse/render path absorbs malformed input locally: missing fields
//! get documented defaults, unknown type tags get generic labels, and
//! unresolvable dependency graphs fall back to a best-effort order.

// Core modules
pub mod config;
pub mod defaults;
pub mod error;
pub mod types;

// Workflow documentation components
pub mod classify;
pub mod parser;
pub mod render;
pub mod sanitize;
pub mod workflow;

// Aggregation
pub mod aggregate;

// Utility modules
pub mod utils;

// Re-exports for convenience
pub use aggregate::{AggregateConfig, ConfigurationAggregator};
pub use classify::{ActionKind, BackendKind, TriggerKind};
pub use config::Config;
pub use error::{ConfigError, ConfigResult};
pub use parser::{ActionDoc, DataSourceDoc, ParsedWorkflow, TriggerDoc, WorkflowParser};
pub use render::render_markdown;
pub use sanitize::sanitize_inputs;
pub use workflow::{ActionSpec, Recurrence, TriggerSpec, WorkflowDefinition};

// Re-export common types
pub use types::DictData;

/// Current version of the documentation core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
