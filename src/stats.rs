use crate::converter::synthesize_node_id;
use crate::mapping::{MappingRegistry, MatchKind};
use crate::workflow::{SourceNode, normalize};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// How much of a workflow the registry can represent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_nodes: usize,
    /// Nodes whose type has an exact mapping.
    pub supported_nodes: usize,
    /// Nodes whose type is only matched by the fuzzy resolver.
    pub partially_supported_nodes: usize,
    /// Nodes a conversion drops: unresolvable types, but also entries that are
    /// not objects, have no id, or repeat an earlier node's converted id.
    pub unsupported_nodes: usize,
    pub supported_types: BTreeSet<String>,
    pub partially_supported_types: BTreeSet<String>,
    /// Types with no mapping at all. Nodes dropped for other reasons do not add to it.
    pub unsupported_types: BTreeSet<String>,
    /// `(supported + partially supported) / total`, or 0 for an empty workflow.
    pub conversion_confidence: f64,
}

/// Computes support counts for a decoded workflow export without converting it.
///
/// Anything that is not a workflow yields all-zero stats.
pub fn conversion_stats(raw: &Value, registry: &MappingRegistry) -> ConversionStats {
    let mut stats = ConversionStats::default();
    let Some(workflow) = normalize(raw) else {
        return stats;
    };

    let mut converted_ids: AHashSet<String> = AHashSet::new();
    for value in workflow.node_values() {
        stats.total_nodes += 1;
        let node = SourceNode::from_value(value).unwrap_or_default();
        let resolution = registry.resolve(&node.node_type);

        // Same admission rules as the converter, so counts match its output.
        let converted = resolution.as_ref().is_some_and(|resolution| {
            !node.id.is_empty()
                && converted_ids.insert(synthesize_node_id(resolution.mapping, &node.id))
        });

        match resolution.map(|r| r.kind) {
            Some(MatchKind::Exact) if converted => {
                stats.supported_nodes += 1;
                stats.supported_types.insert(node.node_type);
            }
            Some(MatchKind::Fuzzy) if converted => {
                stats.partially_supported_nodes += 1;
                stats.partially_supported_types.insert(node.node_type);
            }
            Some(_) => stats.unsupported_nodes += 1,
            None => {
                stats.unsupported_nodes += 1;
                if !node.node_type.is_empty() {
                    stats.unsupported_types.insert(node.node_type);
                }
            }
        }
    }

    if stats.total_nodes > 0 {
        stats.conversion_confidence = (stats.supported_nodes + stats.partially_supported_nodes)
            as f64
            / stats.total_nodes as f64;
    }
    stats
}

/// [`conversion_stats`] against the built-in registry.
pub fn get_conversion_stats(raw: &Value) -> ConversionStats {
    conversion_stats(raw, &MappingRegistry::shared())
}
