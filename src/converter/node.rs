use super::connections::PortLayout;
use super::params::convert_value;
use crate::graph::{InputPort, OutputPort, TargetNode};
use crate::mapping::{MappingRegistry, MatchKind, NodeTypeMapping, Resolution};
use crate::workflow::SourceNode;
use serde_json::Map;

/// Converts single source nodes using a registry.
pub struct NodeConverter<'a> {
    registry: &'a MappingRegistry,
    fuzzy_fallback: bool,
    node_size: [f64; 2],
}

impl<'a> NodeConverter<'a> {
    pub fn new(registry: &'a MappingRegistry, fuzzy_fallback: bool, node_size: [f64; 2]) -> Self {
        Self {
            registry,
            fuzzy_fallback,
            node_size,
        }
    }

    /// Exact lookup first; the fuzzy resolver only when enabled.
    pub fn resolve(&self, source_type: &str) -> Option<Resolution<'a>> {
        match self.registry.resolve(source_type) {
            Some(resolution) if resolution.kind == MatchKind::Fuzzy && !self.fuzzy_fallback => None,
            other => other,
        }
    }

    /// Converts one node. Returns `None` when its type cannot be resolved.
    ///
    /// The converted node's id is `"{target_type}_{source id}"`.
    pub fn convert(&self, node: &SourceNode) -> Option<TargetNode> {
        self.convert_with_layout(node).map(|(target, _)| target)
    }

    /// Like [`convert`](Self::convert), also returning how the node's port
    /// lists split into connection groups.
    pub fn convert_with_layout(&self, node: &SourceNode) -> Option<(TargetNode, PortLayout)> {
        let resolution = self.resolve(&node.node_type)?;
        let mapping = resolution.mapping;

        let title = if node.name.is_empty() {
            mapping.type_leaf().to_string()
        } else {
            node.name.clone()
        };

        let target = TargetNode {
            id: synthesize_node_id(mapping, &node.id),
            node_type: mapping.target_type.clone(),
            title,
            pos: node.position,
            size: self.node_size,
            inputs: input_ports(mapping),
            outputs: output_ports(mapping),
            properties: rewrite_parameters(mapping, &node.parameters),
            color: Some(mapping.color.clone()),
        };
        Some((target, PortLayout::of(mapping)))
    }
}

pub fn synthesize_node_id(mapping: &NodeTypeMapping, source_id: &str) -> String {
    format!("{}_{}", mapping.target_type, source_id)
}

fn input_ports(mapping: &NodeTypeMapping) -> Vec<InputPort> {
    mapping
        .input_mappings
        .values()
        .flatten()
        .map(|name| InputPort::new(name))
        .collect()
}

fn output_ports(mapping: &NodeTypeMapping) -> Vec<OutputPort> {
    mapping
        .output_mappings
        .values()
        .flatten()
        .map(|name| OutputPort::new(name))
        .collect()
}

/// Copies mapped parameters under their target keys. Unmapped keys are dropped.
fn rewrite_parameters(
    mapping: &NodeTypeMapping,
    parameters: &Map<String, serde_json::Value>,
) -> Map<String, serde_json::Value> {
    mapping
        .parameter_mappings
        .iter()
        .filter_map(|(source_key, target_key)| {
            parameters
                .get(source_key)
                .map(|value| (target_key.clone(), convert_value(value)))
        })
        .collect()
}
