use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Port type used for every converted port until port typing is narrowed.
pub const GENERIC_PORT_TYPE: &str = "object";

/// Size given to every converted node.
pub const DEFAULT_NODE_SIZE: [f64; 2] = [200.0, 100.0];

/// A node graph in the visual editor's format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetGraph {
    pub nodes: Vec<TargetNode>,
    pub links: Vec<Link>,
    pub groups: Vec<Value>,
    pub extra: GraphExtra,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphExtra {
    #[serde(rename = "sourceMetadata")]
    pub source_metadata: SourceMetadata,
}

/// Where a converted graph came from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(rename = "originalName")]
    pub original_name: Option<String>,
    #[serde(rename = "importedAt")]
    pub imported_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub title: String,
    pub pos: [f64; 2],
    pub size: [f64; 2],
    pub inputs: Vec<InputPort>,
    pub outputs: Vec<OutputPort>,
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// An input slot. At most one link can arrive at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputPort {
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: String,
    pub link: Option<String>,
}

/// An output slot, fanning out to any number of links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPort {
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: String,
    pub links: Vec<String>,
}

impl InputPort {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            port_type: GENERIC_PORT_TYPE.to_string(),
            link: None,
        }
    }
}

impl OutputPort {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            port_type: GENERIC_PORT_TYPE.to_string(),
            links: Vec::new(),
        }
    }
}

/// A directed connection from an output slot of one node to an input slot of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    pub origin_id: String,
    pub origin_slot: u32,
    pub target_id: String,
    pub target_slot: u32,
    #[serde(rename = "type")]
    pub link_type: String,
}

impl TargetGraph {
    pub fn node(&self, id: &str) -> Option<&TargetNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether every link's endpoints name a node of this graph.
    pub fn links_are_consistent(&self) -> bool {
        let ids: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.links
            .iter()
            .all(|l| ids.contains(l.origin_id.as_str()) && ids.contains(l.target_id.as_str()))
    }
}
