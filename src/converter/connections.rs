use crate::graph::{Link, TargetNode};
use crate::mapping::NodeTypeMapping;
use crate::workflow::SourceConnectionLink;
use ahash::AHashMap;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Range;

/// How connection endpoints (source node names) are matched to converted node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointMatching {
    /// Look the name up in the table built during the node pass.
    #[default]
    Exact,
    /// Take the first converted id that contains the name as a substring.
    Substring,
}

/// Which output slot a link leaves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginSlots {
    /// Always slot 0.
    #[default]
    Fixed,
    /// The bundle's position within its output group.
    BundleIndex,
}

/// Source node name -> converted node id, in node order.
#[derive(Debug, Clone, Default)]
pub struct NodeIdTable {
    entries: Vec<(String, String)>,
    by_name: AHashMap<String, usize>,
}

impl NodeIdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name -> id` and returns `None`. If `name` is already taken,
    /// nothing changes and the id it already maps to is returned.
    pub fn insert(&mut self, name: &str, id: &str) -> Option<&str> {
        if let Some(&existing) = self.by_name.get(name) {
            return Some(self.entries[existing].1.as_str());
        }
        self.by_name.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), id.to_string()));
        None
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&index| self.entries[index].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, name: &str, matching: EndpointMatching) -> Option<&str> {
        match matching {
            EndpointMatching::Exact => self.get(name),
            EndpointMatching::Substring => self
                .entries
                .iter()
                .find(|(_, id)| id.contains(name))
                .map(|(_, id)| id.as_str()),
        }
    }
}

/// Flattens the adjacency map into links between converted nodes.
///
/// Walks node name -> output group -> bundle -> link. Links with an endpoint
/// that is not in `ids` are dropped.
pub fn convert_connections(
    connections: &Map<String, Value>,
    ids: &NodeIdTable,
    matching: EndpointMatching,
    origin_slots: OriginSlots,
) -> Vec<Link> {
    let mut links = Vec::new();
    let mut dropped = 0usize;

    for (origin_name, groups) in connections {
        let Some(groups) = groups.as_object() else {
            continue;
        };
        for (group, bundles) in groups {
            let Some(bundles) = bundles.as_array() else {
                continue;
            };
            for (bundle_index, bundle) in bundles.iter().enumerate() {
                // Unconnected outputs are exported as `null` or `[]`.
                let Some(bundle) = bundle.as_array() else {
                    continue;
                };
                for source_link in bundle.iter().filter_map(SourceConnectionLink::from_value) {
                    let origin = ids.resolve(origin_name, matching);
                    let target = ids.resolve(&source_link.node, matching);
                    let (Some(origin_id), Some(target_id)) = (origin, target) else {
                        tracing::trace!(
                            origin = %origin_name,
                            target = %source_link.node,
                            "dropping link with unresolved endpoint"
                        );
                        dropped += 1;
                        continue;
                    };

                    let origin_slot = match origin_slots {
                        OriginSlots::Fixed => 0,
                        OriginSlots::BundleIndex => bundle_index as u32,
                    };
                    let ordinal = links.len();
                    links.push(Link {
                        id: format!("link_{}_{}_{}", origin_id, target_id, ordinal),
                        origin_id: origin_id.to_string(),
                        origin_slot,
                        target_id: target_id.to_string(),
                        target_slot: source_link.index,
                        link_type: group.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!(links = links.len(), dropped, "converted connections");
    links
}

/// Where each connection group's ports sit in a node's flattened port lists.
///
/// Ports are flattened group by group in key order, so port `index` of group
/// `g` lives at the group's offset plus `index`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortLayout {
    inputs: Vec<(String, Range<usize>)>,
    outputs: Vec<(String, Range<usize>)>,
}

impl PortLayout {
    pub fn of(mapping: &NodeTypeMapping) -> Self {
        Self {
            inputs: group_ranges(&mapping.input_mappings),
            outputs: group_ranges(&mapping.output_mappings),
        }
    }

    /// Position in the input list of port `index` of `group`.
    pub fn input_slot(&self, group: &str, index: u32) -> Option<usize> {
        slot_in(&self.inputs, group, index)
    }

    /// Position in the output list of port `index` of `group`.
    pub fn output_slot(&self, group: &str, index: u32) -> Option<usize> {
        slot_in(&self.outputs, group, index)
    }
}

fn group_ranges(groups: &BTreeMap<String, Vec<String>>) -> Vec<(String, Range<usize>)> {
    let mut start = 0;
    groups
        .iter()
        .map(|(group, ports)| {
            let range = start..start + ports.len();
            start = range.end;
            (group.clone(), range)
        })
        .collect()
}

fn slot_in(groups: &[(String, Range<usize>)], group: &str, index: u32) -> Option<usize> {
    let (_, range) = groups.iter().find(|(name, _)| name == group)?;
    let slot = range.start + index as usize;
    range.contains(&slot).then_some(slot)
}

/// Points each node's ports at the links that use them.
///
/// `layouts[i]` describes `nodes[i]`. A link's port is found from its group
/// (`link_type`) and its slot within that group; when the node has no such
/// port the link stays but no port references it.
pub fn attach_port_links(nodes: &mut [TargetNode], layouts: &[PortLayout], links: &[Link]) {
    let positions: AHashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.clone(), i))
        .collect();
    let layout_of = |id: &str| {
        positions
            .get(id)
            .and_then(|&i| layouts.get(i).map(|layout| (i, layout)))
    };

    for link in links {
        if let Some((i, layout)) = layout_of(&link.origin_id) {
            if let Some(slot) = layout.output_slot(&link.link_type, link.origin_slot) {
                if let Some(port) = nodes[i].outputs.get_mut(slot) {
                    port.links.push(link.id.clone());
                }
            }
        }
        if let Some((i, layout)) = layout_of(&link.target_id) {
            if let Some(slot) = layout.input_slot(&link.link_type, link.target_slot) {
                if let Some(port) = nodes[i].inputs.get_mut(slot) {
                    // An input holds a single link; the first one to arrive keeps it.
                    port.link.get_or_insert_with(|| link.id.clone());
                }
            }
        }
    }
}
