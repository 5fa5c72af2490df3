//! Tests for workflow normalization and lenient node reading.
mod common;
use common::*;
use flowbridge::workflow::{SourceNode, is_workflow, normalize};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_rejects_values_that_are_not_workflows() {
    assert!(normalize(&json!({})).is_none());
    assert!(normalize(&json!([])).is_none());
    assert!(normalize(&json!("workflow")).is_none());
    assert!(normalize(&json!(null)).is_none());
    assert!(normalize(&json!({ "nodes": {} })).is_none());
    assert!(normalize(&json!({ "nodes": null, "connections": {} })).is_none());
}

#[test]
fn test_inserts_missing_connections() {
    let workflow = normalize(&json!({ "nodes": [] })).expect("nodes array is enough");
    assert_eq!(workflow.as_map().get("connections"), Some(&json!({})));
    assert!(workflow.connections().is_empty());
}

#[test]
fn test_replaces_mistyped_connections() {
    for bad in [json!(null), json!([]), json!("none"), json!(3)] {
        let workflow = normalize(&json!({ "nodes": [], "connections": bad })).unwrap();
        assert_eq!(workflow.as_map().get("connections"), Some(&json!({})));
    }
}

#[test]
fn test_leaves_other_fields_untouched() {
    let raw = json!({
        "name": "Keep me",
        "nodes": [node("1", "Start", "n8n-nodes-base.manualTrigger")],
        "connections": { "Start": { "main": [[]] } },
        "settings": { "executionOrder": "v1" },
        "pinData": {},
        "active": false
    });
    let workflow = normalize(&raw).unwrap();
    assert_eq!(workflow.clone().into_value(), raw);
    assert_eq!(workflow.name(), Some("Keep me"));
    assert_eq!(workflow.node_values().len(), 1);
}

#[test]
fn test_normalization_is_idempotent() {
    let inputs = [
        json!({ "nodes": [] }),
        json!({ "nodes": [1, "two"], "connections": [] }),
        branching_workflow(),
    ];
    for raw in inputs {
        let once = normalize(&raw).unwrap();
        let twice = normalize(&once.clone().into_value()).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_does_not_mutate_input() {
    let raw = json!({ "nodes": [], "connections": null });
    let before = raw.clone();
    let _ = normalize(&raw);
    assert_eq!(raw, before);
}

#[test]
fn test_is_workflow_matches_normalize() {
    assert!(is_workflow(&branching_workflow()));
    assert!(is_workflow(&json!({ "nodes": [] })));
    assert!(!is_workflow(&json!({ "name": "no nodes" })));
    assert!(!is_workflow(&json!([{ "nodes": [] }])));
}

#[test]
fn test_source_node_tolerates_missing_and_null_fields() {
    let node = SourceNode::from_value(&json!({
        "id": "7",
        "type": "n8n-nodes-base.set",
        "position": null,
        "parameters": null,
        "credentials": null
    }))
    .expect("nulls fall back to defaults");

    assert_eq!(node.id, "7");
    assert_eq!(node.name, "");
    assert_eq!(node.position, [0.0, 0.0]);
    assert!(node.parameters.is_empty());
    assert!(node.credentials.is_empty());
}

#[test]
fn test_source_node_reads_credentials() {
    let node = SourceNode::from_value(&json!({
        "id": "1",
        "name": "Post",
        "type": "n8n-nodes-base.slack",
        "position": [10, -20.5],
        "credentials": { "slackApi": { "id": "42", "name": "Team Slack" } }
    }))
    .unwrap();

    assert_eq!(node.position, [10.0, -20.5]);
    assert_eq!(node.credentials["slackApi"].id, "42");
    assert_eq!(node.credentials["slackApi"].name, "Team Slack");
}

#[test]
fn test_source_node_rejects_non_objects() {
    assert!(SourceNode::from_value(&json!("node")).is_none());
    assert!(SourceNode::from_value(&json!(["id", "type"])).is_none());
}

#[test]
fn test_source_node_reads_numeric_ids() {
    let node = SourceNode::from_value(&json!({ "id": 2, "type": "n8n-nodes-base.code" })).unwrap();
    assert_eq!(node.id, "2");

    let node = SourceNode::from_value(&json!({ "id": { "nested": true }, "type": "x" })).unwrap();
    assert_eq!(node.id, "");
}

#[test]
fn test_source_node_reads_legacy_credentials() {
    let node = SourceNode::from_value(&json!({
        "id": "1",
        "type": "n8n-nodes-base.slack",
        "credentials": {
            "slackApi": "Team Slack",
            "slackOAuth2Api": { "id": 9, "name": "Bot" },
            "broken": 17
        }
    }))
    .unwrap();

    assert_eq!(node.credentials.len(), 2);
    assert_eq!(node.credentials["slackApi"].id, "");
    assert_eq!(node.credentials["slackApi"].name, "Team Slack");
    assert_eq!(node.credentials["slackOAuth2Api"].id, "9");
}

#[test]
fn test_source_node_defaults_mistyped_fields() {
    let node = SourceNode::from_value(&json!({
        "id": "1",
        "name": 5,
        "type": "n8n-nodes-base.set",
        "position": "left",
        "parameters": [1, 2],
        "credentials": "none"
    }))
    .expect("an object is always readable");

    assert_eq!(node.node_type, "n8n-nodes-base.set");
    assert_eq!(node.name, "");
    assert_eq!(node.position, [0.0, 0.0]);
    assert!(node.parameters.is_empty());
    assert!(node.credentials.is_empty());
}

#[test]
fn test_nodes_skips_unreadable_elements() {
    let workflow = normalize(&json!({
        "nodes": [node("1", "A", "n8n-nodes-base.code"), 5, null, node("2", "B", "n8n-nodes-base.set")]
    }))
    .unwrap();

    assert_eq!(workflow.node_values().len(), 4);
    let ids: Vec<_> = workflow.nodes().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec!["1", "2"]);
}
