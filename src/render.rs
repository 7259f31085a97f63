//! Markdown rendering of parsed workflow records.
//!
//! Rendering is a pure projection: the same record always yields a
//! byte-identical document. Sections backed by empty collections are
//! omitted entirely.

use crate::parser::ParsedWorkflow;

/// Render a parsed workflow as a markdown document with the given title.
///
/// The document contains a trigger section, an execution-order action
/// table, and optional connection and data-source sections.
pub fn render_markdown(parsed: &ParsedWorkflow, title: &str) -> String {
    let mut lines: Vec<String> = vec![format!("## {}\n", title)];

    lines.push("### Trigger Configuration".to_string());
    for trigger in &parsed.triggers {
        lines.push(format!(
            "- **{}** ({}): {}",
            trigger.name, trigger.trigger_type, trigger.description
        ));
    }
    lines.push(String::new());

    lines.push("### Workflow Actions (Execution Order)".to_string());
    lines.push(String::new());
    lines.push("| Step | Action | Type | Description | Depends On |".to_string());
    lines.push("|------|--------|------|-------------|------------|".to_string());
    for (step, action) in parsed.actions.iter().enumerate() {
        let depends_on = if action.run_after.is_empty() {
            "-".to_string()
        } else {
            action.run_after.join(", ")
        };
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            step + 1,
            action.name,
            action.action_type,
            action.description,
            depends_on
        ));
    }
    lines.push(String::new());

    if !parsed.connections.is_empty() {
        lines.push("### API Connections".to_string());
        for connection in &parsed.connections {
            lines.push(format!("- {}", connection));
        }
        lines.push(String::new());
    }

    if !parsed.data_sources.is_empty() {
        lines.push("### Data Sources".to_string());
        for data_source in &parsed.data_sources {
            lines.push(format!(
                "- **{}**: {}",
                data_source.source_type,
                data_source.operation.as_deref().unwrap_or("N/A")
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
