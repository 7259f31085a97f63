//! Integration tests for the azdoc package.
//!
//! These tests verify complete documentation passes: parsing a workflow
//! definition, rendering it to markdown, and aggregating it with other
//! resource categories.

use azdoc::{render_markdown, ConfigurationAggregator, WorkflowParser};
use serde_json::{json, Value};

/// End-to-end scenario: request trigger, SQL stored procedure, response
#[test]
fn test_stored_procedure_workflow() {
    let definition = json!({
        "triggers": {
            "manual": { "type": "Request", "kind": "Http", "inputs": { "method": "POST" } }
        },
        "actions": {
            "A": { "type": "ParseJson", "runAfter": {} },
            "B": {
                "type": "ApiConnection",
                "runAfter": { "A": ["Succeeded"] },
                "inputs": {
                    "host": {
                        "apiId": "/providers/Microsoft.PowerApps/apis/sql",
                        "connection": { "referenceName": "sql-connection" }
                    },
                    "path": "/v2/datasets/default/executeStoredProcedure/sp_GetData"
                }
            },
            "C": {
                "type": "Response",
                "runAfter": { "B": ["Succeeded"] },
                "inputs": { "statusCode": 200 }
            }
        }
    });

    let parsed = WorkflowParser::parse_value(&definition);

    let names: Vec<&str> = parsed.actions.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);

    let sql_action = &parsed.actions[1];
    assert!(sql_action
        .description
        .contains("Execute SQL stored procedure: sp_GetData"));

    assert_eq!(parsed.data_sources.len(), 1);
    assert_eq!(parsed.data_sources[0].source_type, "SQL Server");
    assert_eq!(parsed.data_sources[0].operation.as_deref(), Some("sp_GetData"));

    assert_eq!(parsed.connections, ["sql-connection"]);

    let document = render_markdown(&parsed, "Sample API Workflow");
    assert!(document.contains("| 1 | A | ParseJson |"));
    assert!(document.contains("| 2 | B | ApiConnection |"));
    assert!(document.contains("| 3 | C | Response |"));

    let data_source_bullets = document
        .lines()
        .skip_while(|line| *line != "### Data Sources")
        .filter(|line| line.starts_with("- "))
        .count();
    assert_eq!(data_source_bullets, 1);
}

/// An empty definition still yields a complete document skeleton
#[test]
fn test_empty_definition_document() {
    let parsed = WorkflowParser::parse_value(&json!({}));

    assert!(parsed.triggers.is_empty());
    assert!(parsed.actions.is_empty());
    assert!(parsed.connections.is_empty());
    assert!(parsed.data_sources.is_empty());
    assert!(parsed.parameters.is_empty());
    assert!(parsed.variables.is_empty());

    let document = render_markdown(&parsed, "Empty");
    assert!(document.starts_with("## Empty\n"));
    assert!(document.contains("### Trigger Configuration"));
    assert!(document.contains("| Step | Action | Type | Description | Depends On |"));
    assert!(document.contains("|------|--------|------|-------------|------------|"));
    assert!(!document.contains("| 1 |"));
    assert!(!document.contains("### API Connections"));
    assert!(!document.contains("### Data Sources"));
}

/// Rendering the same record twice yields byte-identical output
#[test]
fn test_render_idempotence() {
    let parsed = WorkflowParser::parse_value(&json!({
        "triggers": { "timer": { "type": "Recurrence", "recurrence": { "frequency": "Hour", "interval": 2 } } },
        "actions": {
            "Collect": {
                "type": "ApiConnection",
                "inputs": { "host": { "apiId": "/apis/sharepointonline" } }
            }
        }
    }));

    assert_eq!(
        render_markdown(&parsed, "Sync"),
        render_markdown(&parsed, "Sync")
    );
}

/// No input shape causes abnormal termination
#[test]
fn test_parse_never_fails() {
    let hostile_inputs = [
        json!(null),
        json!(42),
        json!("just a string"),
        json!([1, 2, 3]),
        json!({ "triggers": 7, "actions": "nope" }),
        json!({ "actions": { "A": null, "B": 1, "C": [true] } }),
        json!({ "actions": { "A": { "type": null, "runAfter": { "A": null }, "inputs": 9 } } }),
        json!({ "triggers": { "t": { "type": "Recurrence", "recurrence": "soon" } } }),
    ];

    for input in &hostile_inputs {
        let parsed = WorkflowParser::parse_value(input);
        let document = render_markdown(&parsed, "Hostile");
        assert!(document.starts_with("## Hostile\n"), "input: {}", input);
    }

    // Self-referencing action terminates and is kept
    let self_loop = WorkflowParser::parse_value(&json!({
        "actions": { "Me": { "type": "Compose", "runAfter": { "Me": ["Succeeded"] } } }
    }));
    assert_eq!(self_loop.actions.len(), 1);
}

/// Full aggregation pass across resource categories
#[test]
fn test_aggregation_end_to_end() {
    let mut aggregator = ConfigurationAggregator::new();
    aggregator.set_metadata("orders", "prod", "sub-001");

    aggregator.add_apim_config(&json!({
        "name": "apim-orders-prod",
        "location": "westeurope",
        "sku": { "name": "Developer", "capacity": 1 }
    }));

    aggregator.add_api_config(&json!({
        "name": "orders-api",
        "path": "orders",
        "serviceUrl": "https://la-orders-prod.azurewebsites.net/api/orders"
    }));

    aggregator.add_logic_app_config(&json!({
        "name": "la-orders-prod",
        "kind": "Standard",
        "state": "Enabled"
    }));

    aggregator.add_workflow_config(
        &json!({
            "triggers": { "manual": { "type": "Request" } },
            "actions": {
                "Query": {
                    "type": "ApiConnection",
                    "inputs": {
                        "host": {
                            "apiId": "/apis/sql",
                            "connection": { "referenceName": "sql-connection" }
                        },
                        "path": "/executeQuery/orders"
                    }
                },
                "Reply": { "type": "Response", "runAfter": { "Query": ["Succeeded"] } }
            }
        }),
        "wf-get-orders",
    );

    aggregator.add_connection_config(&[json!({
        "name": "sql-connection",
        "api": { "name": "sql" },
        "statuses": [{ "status": "Connected" }],
        "parameterValues": { "server": "sql-prod.internal", "database": "orders" }
    })]);

    let exported: Value = aggregator.to_value();

    assert_eq!(exported["metadata"]["service_name"], json!("orders"));
    assert_eq!(exported["metadata"]["environment"], json!("prod"));

    let service = exported["service"].as_object().unwrap();
    assert!(service.contains_key("apim"));
    assert!(service.contains_key("api"));
    assert!(service.contains_key("logic_app"));
    assert!(service.contains_key("workflow"));
    assert!(service.contains_key("connections"));
    assert!(!service.contains_key("key_vault"));

    assert_eq!(
        exported["service"]["api"]["backend_type"]["type"],
        json!("Logic App Standard")
    );
    assert_eq!(
        exported["service"]["api"]["backend_type"]["name"],
        json!("la-orders-prod")
    );

    let workflow = &exported["service"]["workflow"];
    assert_eq!(workflow["name"], json!("wf-get-orders"));
    assert_eq!(workflow["parsed"]["connections"], json!(["sql-connection"]));
    assert!(workflow["markdown"]
        .as_str()
        .unwrap()
        .contains("### Workflow Actions (Execution Order)"));

    assert_eq!(
        exported["service"]["connections"][0]["sql_server"],
        json!("sql-prod.internal")
    );
}
