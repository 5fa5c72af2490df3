//! Conversion of source workflows into target graphs.
//!
//! A conversion runs in three passes over a normalized workflow:
//!
//! 1.  **Nodes**: each source node is resolved against the [`MappingRegistry`]
//!     and rewritten into a [`TargetNode`]. Nodes whose type cannot be resolved
//!     are dropped. Every converted node's name is recorded in a [`NodeIdTable`].
//! 2.  **Connections**: the adjacency map is flattened into [`Link`]s, resolving
//!     both endpoints by name through the table. Links touching a dropped node
//!     are dropped with it.
//! 3.  **Assembly**: ports are pointed at their links and everything is wrapped
//!     into a [`TargetGraph`].
//!
//! [`Link`]: crate::graph::Link

use crate::error::ConvertError;
use crate::graph::{DEFAULT_NODE_SIZE, GraphExtra, SourceMetadata, TargetGraph, TargetNode};
use crate::mapping::{MappingRegistry, NodeTypeMapping};
use crate::workflow::{SourceNode, normalize};
use ahash::AHashSet;
use serde_json::Value;
use std::sync::Arc;

mod connections;
mod node;
pub mod params;

pub use connections::{
    EndpointMatching, NodeIdTable, OriginSlots, PortLayout, attach_port_links, convert_connections,
};
pub use node::{NodeConverter, synthesize_node_id};

/// What to do when two source nodes share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateNamePolicy {
    /// Connections by that name resolve to the first node carrying it.
    #[default]
    FirstOccurrence,
    /// Fail the conversion with [`ConvertError::DuplicateNodeName`].
    Reject,
}

/// Converts source workflows into target graphs.
///
/// Holds no state besides its configuration and a shared, read-only registry,
/// so one instance can serve concurrent conversions.
#[derive(Debug, Clone)]
pub struct WorkflowConverter {
    registry: Arc<MappingRegistry>,
    fuzzy_fallback: bool,
    endpoint_matching: EndpointMatching,
    origin_slots: OriginSlots,
    duplicate_names: DuplicateNamePolicy,
    node_size: [f64; 2],
}

pub struct WorkflowConverterBuilder {
    registry: Arc<MappingRegistry>,
    fuzzy_fallback: bool,
    endpoint_matching: EndpointMatching,
    origin_slots: OriginSlots,
    duplicate_names: DuplicateNamePolicy,
    node_size: [f64; 2],
}

impl Default for WorkflowConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowConverterBuilder {
    pub fn new() -> Self {
        Self {
            registry: MappingRegistry::shared(),
            fuzzy_fallback: true,
            endpoint_matching: EndpointMatching::default(),
            origin_slots: OriginSlots::default(),
            duplicate_names: DuplicateNamePolicy::default(),
            node_size: DEFAULT_NODE_SIZE,
        }
    }
    pub fn with_registry(mut self, registry: Arc<MappingRegistry>) -> Self {
        self.registry = registry;
        self
    }
    /// Adds a mapping on top of the current registry.
    pub fn with_mapping(mut self, mapping: NodeTypeMapping) -> Self {
        Arc::make_mut(&mut self.registry).insert(mapping);
        self
    }
    /// Makes `source_type` convert like `known_source_type`. Ignored if the latter is unknown.
    pub fn with_type_alias(mut self, source_type: &str, known_source_type: &str) -> Self {
        if !Arc::make_mut(&mut self.registry).alias(source_type, known_source_type) {
            tracing::warn!(
                source_type,
                known_source_type,
                "ignoring alias to a type without a mapping"
            );
        }
        self
    }
    pub fn with_fuzzy_fallback(mut self, enabled: bool) -> Self {
        self.fuzzy_fallback = enabled;
        self
    }
    pub fn with_endpoint_matching(mut self, matching: EndpointMatching) -> Self {
        self.endpoint_matching = matching;
        self
    }
    pub fn with_origin_slots(mut self, origin_slots: OriginSlots) -> Self {
        self.origin_slots = origin_slots;
        self
    }
    pub fn with_duplicate_names(mut self, policy: DuplicateNamePolicy) -> Self {
        self.duplicate_names = policy;
        self
    }
    pub fn with_node_size(mut self, size: [f64; 2]) -> Self {
        self.node_size = size;
        self
    }
    pub fn build(self) -> WorkflowConverter {
        WorkflowConverter {
            registry: self.registry,
            fuzzy_fallback: self.fuzzy_fallback,
            endpoint_matching: self.endpoint_matching,
            origin_slots: self.origin_slots,
            duplicate_names: self.duplicate_names,
            node_size: self.node_size,
        }
    }
}

impl Default for WorkflowConverter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WorkflowConverter {
    pub fn builder() -> WorkflowConverterBuilder {
        WorkflowConverterBuilder::new()
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn node_converter(&self) -> NodeConverter<'_> {
        NodeConverter::new(&self.registry, self.fuzzy_fallback, self.node_size)
    }

    /// Converts a single node. See [`NodeConverter::convert`].
    pub fn convert_node(&self, node: &SourceNode) -> Option<TargetNode> {
        self.node_converter().convert(node)
    }

    /// Converts a decoded workflow export, leaving `importedAt` unset.
    pub fn convert(&self, raw: &Value) -> Result<TargetGraph, ConvertError> {
        self.convert_inner(raw, None)
    }

    /// Converts a decoded workflow export, stamping the graph with `imported_at`.
    pub fn convert_at(&self, raw: &Value, imported_at: &str) -> Result<TargetGraph, ConvertError> {
        self.convert_inner(raw, Some(imported_at.to_string()))
    }

    fn convert_inner(
        &self,
        raw: &Value,
        imported_at: Option<String>,
    ) -> Result<TargetGraph, ConvertError> {
        let workflow = normalize(raw).ok_or_else(|| {
            ConvertError::InvalidWorkflow(
                "expected a JSON object with a 'nodes' array".to_string(),
            )
        })?;

        let node_converter = self.node_converter();
        let mut nodes: Vec<TargetNode> = Vec::new();
        let mut layouts: Vec<PortLayout> = Vec::new();
        let mut used_ids: AHashSet<String> = AHashSet::new();
        let mut ids = NodeIdTable::new();

        for (index, value) in workflow.node_values().iter().enumerate() {
            let Some(source) = SourceNode::from_value(value) else {
                tracing::warn!(index, "skipping node that is not a node object");
                continue;
            };
            if source.id.is_empty() {
                tracing::warn!(index, name = %source.name, "skipping node without an id");
                continue;
            }
            let Some((target, layout)) = node_converter.convert_with_layout(&source) else {
                tracing::warn!(
                    node = %source.name,
                    node_type = %source.node_type,
                    "dropping node of unsupported type"
                );
                continue;
            };
            if !used_ids.insert(target.id.clone()) {
                tracing::warn!(id = %target.id, "dropping node with a duplicate id");
                continue;
            }

            if !source.name.is_empty() {
                if let Some(first_id) = ids.insert(&source.name, &target.id) {
                    match self.duplicate_names {
                        DuplicateNamePolicy::Reject => {
                            return Err(ConvertError::DuplicateNodeName {
                                name: source.name,
                                first_id: first_id.to_string(),
                                second_id: target.id,
                            });
                        }
                        DuplicateNamePolicy::FirstOccurrence => tracing::warn!(
                            name = %source.name,
                            kept = %first_id,
                            ignored = %target.id,
                            "duplicate node name; connections resolve to the first node"
                        ),
                    }
                }
            }
            tracing::debug!(id = %target.id, "converted node");
            nodes.push(target);
            layouts.push(layout);
        }

        let links = convert_connections(
            workflow.connections(),
            &ids,
            self.endpoint_matching,
            self.origin_slots,
        );
        attach_port_links(&mut nodes, &layouts, &links);

        tracing::debug!(
            nodes = nodes.len(),
            source_nodes = workflow.node_values().len(),
            links = links.len(),
            "converted workflow"
        );

        Ok(TargetGraph {
            nodes,
            links,
            groups: Vec::new(),
            extra: GraphExtra {
                source_metadata: SourceMetadata {
                    original_name: workflow.name().map(str::to_string),
                    imported_at,
                },
            },
        })
    }
}

/// Converts with the built-in registry and default settings.
pub fn convert_workflow(raw: &Value) -> Result<TargetGraph, ConvertError> {
    WorkflowConverter::default().convert(raw)
}
