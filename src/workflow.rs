//! Raw workflow definition model.
//!
//! This module contains the input-side model for Logic App workflow
//! definitions: named triggers plus named actions connected by `runAfter`
//! dependency edges. Definitions arrive as already-parsed JSON and are read
//! tolerantly, so a missing or malformed sub-shape degrades to an empty
//! default instead of rejecting the whole document.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::types::{get_i64, get_map, get_str};

/// Raw workflow definition: triggers and actions keyed by name.
///
/// Both maps preserve the iteration order of the source document. Trigger
/// order carries no semantics beyond reproducibility; action input order is
/// the tiebreaker for dependency ordering and the fallback order for
/// unresolvable graphs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowDefinition {
    /// Trigger specifications keyed by trigger name
    pub triggers: IndexMap<String, TriggerSpec>,

    /// Action specifications keyed by action name
    pub actions: IndexMap<String, ActionSpec>,
}

/// Trigger specification within a workflow definition
#[derive(Debug, Clone, Serialize)]
pub struct TriggerSpec {
    /// Type tag identifying the trigger kind
    pub trigger_type: String,

    /// Optional trigger sub-kind (e.g. `Http`)
    pub kind: Option<String>,

    /// Free-form trigger inputs
    pub inputs: Value,

    /// Recurrence settings for scheduled triggers
    pub recurrence: Option<Recurrence>,
}

/// Recurrence settings on a scheduled trigger
#[derive(Debug, Clone, Serialize)]
pub struct Recurrence {
    /// Recurrence frequency (e.g. `Day`, `Hour`)
    pub frequency: Option<String>,

    /// Recurrence interval in frequency units
    pub interval: Option<i64>,
}

/// Action specification within a workflow definition
#[derive(Debug, Clone, Serialize)]
pub struct ActionSpec {
    /// Type tag identifying the action kind
    pub action_type: String,

    /// Optional action sub-kind
    pub kind: Option<String>,

    /// Dependency edges: predecessor action name to required statuses.
    /// The status lists are carried through but not interpreted here.
    pub run_after: IndexMap<String, Vec<String>>,

    /// Free-form action inputs specific to the type
    pub inputs: Value,
}

impl WorkflowDefinition {
    /// Build a definition from an already-parsed JSON value.
    ///
    /// Missing `triggers`/`actions` keys are treated as empty maps; entries
    /// that are not objects contribute a default spec under their name so no
    /// node is dropped.
    pub fn from_value(value: &Value) -> Self {
        let mut definition = Self::default();

        if let Some(triggers) = get_map(value, "triggers") {
            for (name, trigger) in triggers {
                definition
                    .triggers
                    .insert(name.clone(), TriggerSpec::from_value(trigger));
            }
        }

        if let Some(actions) = get_map(value, "actions") {
            for (name, action) in actions {
                definition
                    .actions
                    .insert(name.clone(), ActionSpec::from_value(action));
            }
        }

        definition
    }

    /// Check whether the definition has no triggers and no actions
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty() && self.actions.is_empty()
    }
}

impl TriggerSpec {
    /// Build a trigger spec from a JSON value, defaulting malformed fields
    pub fn from_value(value: &Value) -> Self {
        let recurrence = value.get("recurrence").map(|rec| Recurrence {
            frequency: get_str(rec, "frequency").map(str::to_string),
            interval: get_i64(rec, "interval"),
        });

        Self {
            trigger_type: get_str(value, "type").unwrap_or("Unknown").to_string(),
            kind: get_str(value, "kind").map(str::to_string),
            inputs: value.get("inputs").cloned().unwrap_or(Value::Null),
            recurrence,
        }
    }
}

impl ActionSpec {
    /// Build an action spec from a JSON value, defaulting malformed fields
    pub fn from_value(value: &Value) -> Self {
        let mut run_after = IndexMap::new();
        if let Some(edges) = get_map(value, "runAfter") {
            for (predecessor, statuses) in edges {
                let statuses = statuses
                    .as_array()
                    .map(|list| {
                        list.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                run_after.insert(predecessor.clone(), statuses);
            }
        }

        Self {
            action_type: get_str(value, "type").unwrap_or("Unknown").to_string(),
            kind: get_str(value, "kind").map(str::to_string),
            run_after,
            inputs: value.get("inputs").cloned().unwrap_or(Value::Null),
        }
    }
}
