//! Common test utilities for building raw workflow exports.
use serde_json::{Value, json};

/// A node element as it appears in the `nodes` array of an export.
#[allow(dead_code)]
pub fn node(id: &str, name: &str, node_type: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": node_type,
        "position": [100, 200],
        "parameters": {}
    })
}

/// A node element carrying the given parameters.
#[allow(dead_code)]
pub fn node_with_params(id: &str, name: &str, node_type: &str, parameters: Value) -> Value {
    let mut node = node(id, name, node_type);
    node["parameters"] = parameters;
    node
}

/// One entry of a connection bundle.
#[allow(dead_code)]
pub fn link_to(target_name: &str, index: u32) -> Value {
    json!({ "node": target_name, "type": "main", "index": index })
}

#[allow(dead_code)]
pub fn workflow(name: &str, nodes: Vec<Value>, connections: Value) -> Value {
    json!({
        "name": name,
        "nodes": nodes,
        "connections": connections,
    })
}

/// Webhook -> HTTP request -> IF, whose true branch posts to Slack and whose
/// false branch goes to an unmappable node.
///
/// Webhook --main--> Fetch --main--> Check --true--> Notify
///                                         --false-> Mystery (unsupported)
#[allow(dead_code)]
pub fn branching_workflow() -> Value {
    workflow(
        "Branching",
        vec![
            node("1", "Webhook", "n8n-nodes-base.webhook"),
            node_with_params(
                "2",
                "Fetch",
                "n8n-nodes-base.httpRequest",
                json!({ "url": "https://example.com/api", "method": "GET", "sendBody": false }),
            ),
            node("3", "Check", "n8n-nodes-base.if"),
            node_with_params(
                "4",
                "Notify",
                "n8n-nodes-base.slack",
                json!({ "channel": "#alerts", "text": "{{ $json.title }}" }),
            ),
            node("5", "Mystery", "acme.frobnicator"),
        ],
        json!({
            "Webhook": { "main": [[link_to("Fetch", 0)]] },
            "Fetch": { "main": [[link_to("Check", 0)]] },
            "Check": { "main": [[link_to("Notify", 0)], [link_to("Mystery", 0)]] },
        }),
    )
}
