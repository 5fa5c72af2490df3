use ahash::AHashMap;
use serde_json::Value;

/// Structural pre-flight checks on a decoded workflow export.
///
/// Returns human-readable problems; an empty list means the workflow is
/// structurally valid. Node types are not checked against any registry.
pub fn validate(raw: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(workflow) = raw.as_object() else {
        errors.push("Workflow must be a JSON object".to_string());
        return errors;
    };

    match workflow.get("nodes") {
        None => errors.push("Workflow is missing the 'nodes' array".to_string()),
        Some(Value::Array(nodes)) if nodes.is_empty() => {
            errors.push("Workflow has no nodes".to_string())
        }
        Some(Value::Array(nodes)) => check_nodes(nodes, &mut errors),
        Some(_) => errors.push("'nodes' must be an array".to_string()),
    }

    if let Some(connections) = workflow.get("connections") {
        if !connections.is_object() {
            errors.push("'connections' must be an object".to_string());
        }
    }

    errors
}

fn check_nodes(nodes: &[Value], errors: &mut Vec<String>) {
    let mut first_by_name: AHashMap<&str, String> = AHashMap::new();

    for (index, node) in nodes.iter().enumerate() {
        let Some(node) = node.as_object() else {
            errors.push(format!("Node {} must be an object", index));
            continue;
        };

        match node.get("id") {
            None | Some(Value::Null) => errors.push(format!("Node {} is missing 'id'", index)),
            Some(Value::String(_) | Value::Number(_)) => {}
            Some(_) => errors.push(format!(
                "Node {} has an 'id' that is not a string or number",
                index
            )),
        }
        if node.get("type").is_none_or(Value::is_null) {
            errors.push(format!("Node {} is missing 'type'", index));
        }

        let name = node.get("name").and_then(Value::as_str);
        let id = display_id(node.get("id"));
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            if let Some(first_id) = first_by_name.get(name) {
                errors.push(format!(
                    "Duplicate node name '{}' (nodes '{}' and '{}')",
                    name, first_id, id
                ));
            } else {
                first_by_name.insert(name, id);
            }
        }
    }
}

/// Node ids as they appear in messages: strings unquoted, anything else as JSON.
fn display_id(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => "?".to_string(),
        Some(other) => other.to_string(),
    }
}
