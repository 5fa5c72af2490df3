use crate::mapping::MappingRegistry;
use crate::stats::{ConversionStats, conversion_stats};
use crate::workflow::normalize;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Confidence at or above which a workflow is badged as supported.
pub const SUPPORTED_THRESHOLD: f64 = 0.8;

/// What a workflow library index needs to know about one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: Option<String>,
    pub node_count: usize,
    pub stats: ConversionStats,
    pub supported: bool,
}

/// Classifies a decoded file. Returns `None` if it is not a workflow export.
pub fn inspect(raw: &Value, registry: &MappingRegistry) -> Option<CatalogEntry> {
    inspect_with_threshold(raw, registry, SUPPORTED_THRESHOLD)
}

pub fn inspect_with_threshold(
    raw: &Value,
    registry: &MappingRegistry,
    threshold: f64,
) -> Option<CatalogEntry> {
    let workflow = normalize(raw)?;
    let stats = conversion_stats(raw, registry);
    Some(CatalogEntry {
        name: workflow.name().map(str::to_string),
        node_count: workflow.node_values().len(),
        supported: stats.total_nodes > 0 && stats.conversion_confidence >= threshold,
        stats,
    })
}
