use super::model::SourceWorkflow;
use serde_json::{Map, Value};

/// Repairs a decoded JSON value into a well-formed [`SourceWorkflow`].
///
/// Returns `None` when `raw` is not an object, has no `nodes` key, or its
/// `nodes` is not an array. On success `connections` is guaranteed to be an
/// object (an empty one replaces a missing or mistyped value); every other
/// field is carried over as is.
pub fn normalize(raw: &Value) -> Option<SourceWorkflow> {
    let object = raw.as_object()?;
    if !object.get("nodes")?.is_array() {
        return None;
    }

    let mut document = object.clone();
    if !document.get("connections").is_some_and(Value::is_object) {
        document.insert("connections".to_string(), Value::Object(Map::new()));
    }
    Some(SourceWorkflow { document })
}

/// Whether `raw` has the shape of a workflow export at all.
pub fn is_workflow(raw: &Value) -> bool {
    raw.as_object()
        .and_then(|object| object.get("nodes"))
        .is_some_and(Value::is_array)
}
