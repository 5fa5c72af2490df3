use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A reference to a stored credential, as exported alongside a node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CredentialRef {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
}

/// A single node of a source workflow.
///
/// Every field tolerates being absent, `null` or oddly shaped and falls back
/// to its default; structural problems are reported by the validator rather
/// than rejected here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceNode {
    /// Numeric ids are read as their decimal text.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub node_type: String,
    #[serde(default, deserialize_with = "lenient")]
    pub position: [f64; 2],
    #[serde(default, deserialize_with = "lenient")]
    pub parameters: Map<String, Value>,
    #[serde(default, deserialize_with = "credential_refs")]
    pub credentials: BTreeMap<String, CredentialRef>,
}

impl SourceNode {
    /// Reads a node out of an element of the `nodes` array.
    ///
    /// Returns `None` only when the element is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }
}

/// One entry of a connection bundle: the link into `node`'s `index`-th port of group `kind`.
///
/// Links address their target by node *name*, not id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConnectionLink {
    pub node: String,
    #[serde(rename = "type", default = "default_connection_type")]
    pub kind: String,
    #[serde(default)]
    pub index: u32,
}

impl SourceConnectionLink {
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::deserialize(value).ok()
    }
}

fn default_connection_type() -> String {
    "main".to_string()
}

/// A normalized source workflow.
///
/// Wraps the original JSON document so that fields this crate does not
/// interpret survive untouched. Construct one with [`crate::workflow::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceWorkflow {
    pub(crate) document: Map<String, Value>,
}

impl SourceWorkflow {
    /// The workflow's display name, if it has a string one.
    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    /// Raw elements of the `nodes` array, in source order.
    pub fn node_values(&self) -> &[Value] {
        self.document
            .get("nodes")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The nodes that could be read as [`SourceNode`]s, in source order.
    pub fn nodes(&self) -> Vec<SourceNode> {
        self.node_values()
            .iter()
            .filter_map(SourceNode::from_value)
            .collect()
    }

    /// The adjacency map: source node name -> output group -> bundles -> links.
    pub fn connections(&self) -> &Map<String, Value> {
        static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);
        self.document
            .get("connections")
            .and_then(Value::as_object)
            .unwrap_or(&EMPTY)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.document)
    }
}

/// Reads a field, falling back to the type's default when it is `null` or
/// has an incompatible shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Reads a string or numeric id. Anything else reads as an empty id.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        _ => String::new(),
    })
}

fn credential_refs<'de, D>(deserializer: D) -> Result<BTreeMap<String, CredentialRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(kind, value)| {
            let credential = match value {
                // Older exports store only the credential's name.
                Value::String(name) => CredentialRef {
                    id: String::new(),
                    name,
                },
                object @ Value::Object(_) => serde_json::from_value(object).ok()?,
                _ => return None,
            };
            Some((kind, credential))
        })
        .collect())
}
