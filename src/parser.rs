//! Workflow definition parser.
//!
//! This module contains the core transformation from a raw, graph-shaped
//! workflow definition into a structured documentation record: a
//! deterministic linear execution order over the action dependency graph,
//! one-line semantic descriptions per node, extracted connection references
//! and data sources, and a sanitized projection of each action's inputs.
//!
//! Parsing never fails. Malformed nodes degrade locally to documented
//! defaults and unresolvable dependency graphs fall back to input order, so
//! a documentation pass always produces a complete record.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::classify::{describe_action, describe_trigger, extract_connection, identify_data_source};
use crate::defaults::ORDERING_ROUND_FACTOR;
use crate::sanitize::sanitize_inputs;
use crate::workflow::{ActionSpec, WorkflowDefinition};

/// Documentation record for a single trigger
#[derive(Debug, Clone, Serialize)]
pub struct TriggerDoc {
    /// Trigger name
    pub name: String,

    /// Trigger type tag
    #[serde(rename = "type")]
    pub trigger_type: String,

    /// Trigger sub-kind, when present
    pub kind: Option<String>,

    /// One-line semantic description
    pub description: String,
}

/// Documentation record for a single action
#[derive(Debug, Clone, Serialize)]
pub struct ActionDoc {
    /// Action name
    pub name: String,

    /// Action type tag
    #[serde(rename = "type")]
    pub action_type: String,

    /// One-line semantic description
    pub description: String,

    /// Names of predecessor actions this action runs after
    pub run_after: Vec<String>,

    /// Sanitized copy of the action's inputs
    pub inputs: Value,
}

/// Documentation record for a data backend touched by an action
#[derive(Debug, Clone, Serialize)]
pub struct DataSourceDoc {
    /// Backend type label (e.g. `SQL Server`)
    #[serde(rename = "type")]
    pub source_type: String,

    /// Type tag of the action touching the backend
    #[serde(rename = "action")]
    pub action_type: String,

    /// Backend operation, when one can be derived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
}

/// Structured documentation record produced by [`WorkflowParser::parse`].
///
/// Every action name present in the input definition appears exactly once in
/// `actions`; nothing is fabricated or dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedWorkflow {
    /// Triggers in input iteration order
    pub triggers: Vec<TriggerDoc>,

    /// Actions in computed execution order
    pub actions: Vec<ActionDoc>,

    /// Distinct connection reference names, first-occurrence order
    pub connections: Vec<String>,

    /// One entry per action touching a known data backend
    pub data_sources: Vec<DataSourceDoc>,

    /// Reserved for future use, always empty
    pub parameters: Vec<Value>,

    /// Reserved for future use, always empty
    pub variables: Vec<Value>,
}

/// Parser from raw workflow definitions to documentation records
pub struct WorkflowParser;

impl WorkflowParser {
    /// Parse an already-parsed JSON workflow definition.
    ///
    /// Convenience wrapper over [`WorkflowDefinition::from_value`] followed
    /// by [`WorkflowParser::parse`]. An empty or malformed value yields an
    /// all-empty record.
    pub fn parse_value(value: &Value) -> ParsedWorkflow {
        Self::parse(&WorkflowDefinition::from_value(value))
    }

    /// Parse a workflow definition into a structured documentation record
    pub fn parse(definition: &WorkflowDefinition) -> ParsedWorkflow {
        let mut parsed = ParsedWorkflow::default();

        for (name, trigger) in &definition.triggers {
            parsed.triggers.push(TriggerDoc {
                name: name.clone(),
                trigger_type: trigger.trigger_type.clone(),
                kind: trigger.kind.clone(),
                description: describe_trigger(trigger),
            });
        }

        for name in Self::order_actions(&definition.actions) {
            let Some(action) = definition.actions.get(&name) else {
                continue;
            };

            parsed.actions.push(ActionDoc {
                name: name.clone(),
                action_type: action.action_type.clone(),
                description: describe_action(action),
                run_after: action.run_after.keys().cloned().collect(),
                inputs: sanitize_inputs(&action.inputs),
            });

            if let Some(connection) = extract_connection(action) {
                if !parsed.connections.contains(&connection) {
                    parsed.connections.push(connection);
                }
            }

            if let Some(data_source) = identify_data_source(action) {
                parsed.data_sources.push(data_source);
            }
        }

        parsed
    }

    /// Order actions by execution dependency.
    ///
    /// Repeatedly scans the not-yet-ordered actions in input order, emitting
    /// every action whose `run_after` predecessors have all been emitted.
    /// When a full scan makes no progress (a cycle, or edges pointing at
    /// names that can never resolve), the unresolved remainder is appended
    /// in its original input order so the documentation pass still covers
    /// every node. A hard cap of 2x the action count bounds the scan
    /// independently of the progress check.
    fn order_actions(actions: &IndexMap<String, ActionSpec>) -> Vec<String> {
        let mut ordered: Vec<String> = Vec::with_capacity(actions.len());
        let mut emitted: HashSet<&str> = HashSet::with_capacity(actions.len());
        let mut remaining: Vec<&String> = actions.keys().collect();

        let max_rounds = actions.len() * ORDERING_ROUND_FACTOR;
        let mut rounds = 0;

        while !remaining.is_empty() && rounds < max_rounds {
            rounds += 1;

            let before = ordered.len();
            let mut unresolved = Vec::with_capacity(remaining.len());

            for name in remaining {
                let ready = actions[name.as_str()]
                    .run_after
                    .keys()
                    .all(|dep| emitted.contains(dep.as_str()));

                if ready {
                    emitted.insert(name.as_str());
                    ordered.push(name.clone());
                } else {
                    unresolved.push(name);
                }
            }

            remaining = unresolved;

            if ordered.len() == before {
                break;
            }
        }

        if !remaining.is_empty() {
            tracing::warn!(
                unresolved = remaining.len(),
                "action dependencies could not be fully resolved; appending remainder in input order"
            );
            ordered.extend(remaining.into_iter().cloned());
        }

        ordered
    }
}

impl ParsedWorkflow {
    /// Render this record as a markdown document with the given title
    pub fn to_markdown(&self, title: &str) -> String {
        crate::render::render_markdown(self, title)
    }
}
