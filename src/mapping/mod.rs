//! Node-type identity across the two vocabularies.
//!
//! A [`MappingRegistry`] holds one [`NodeTypeMapping`] per known source type.
//! Lookups are exact; when they miss, the registry's [`FuzzyResolver`] gets a
//! chance to pick the closest known mapping from keywords in the type name.

use crate::error::MappingError;
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, LazyLock};

mod builtin;
pub mod fuzzy;

pub use fuzzy::{DEFAULT_FUZZY_RULES, FuzzyResolver, FuzzyRule};

/// Display color used when a mapping does not specify one.
pub const DEFAULT_COLOR: &str = "#666666";

static SHARED_REGISTRY: LazyLock<Arc<MappingRegistry>> =
    LazyLock::new(|| Arc::new(MappingRegistry::builtin()));

/// Describes how nodes of one source type are represented in the target graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTypeMapping {
    pub source_type: String,
    /// Slash-namespaced target type, e.g. `action/http_request`.
    pub target_type: String,
    #[serde(default)]
    pub category: String,
    /// Source parameter key -> target property key.
    #[serde(default)]
    pub parameter_mappings: BTreeMap<String, String>,
    /// Connection group -> target input port names, in slot order.
    #[serde(default)]
    pub input_mappings: BTreeMap<String, Vec<String>>,
    /// Connection group -> target output port names, in slot order.
    #[serde(default)]
    pub output_mappings: BTreeMap<String, Vec<String>>,
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl NodeTypeMapping {
    /// The last segment of the target type, used as a fallback node title.
    pub fn type_leaf(&self) -> &str {
        self.target_type
            .rsplit('/')
            .next()
            .unwrap_or(&self.target_type)
    }

    fn check(&self) -> Result<(), MappingError> {
        let invalid = |message: &str| MappingError::InvalidEntry {
            source_type: self.source_type.clone(),
            message: message.to_string(),
        };
        if self.source_type.trim().is_empty() {
            return Err(invalid("source_type must not be empty"));
        }
        if !self.target_type.contains('/') {
            return Err(invalid("target_type must be namespaced, e.g. 'action/http_request'"));
        }
        Ok(())
    }
}

/// How a source type was matched to a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub mapping: &'a NodeTypeMapping,
    pub kind: MatchKind,
}

/// Table from source node type to target type descriptor.
///
/// Build and extend one before handing it to a converter; converters only read it.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    mappings: AHashMap<String, NodeTypeMapping>,
    fuzzy: FuzzyResolver,
}

impl MappingRegistry {
    /// An empty registry with the default fuzzy rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in mapping table.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for mapping in builtin::builtin_mappings() {
            registry.insert(mapping);
        }
        registry
    }

    /// The process-wide built-in registry, constructed on first use.
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED_REGISTRY)
    }

    /// Builds a registry from a JSON array of mappings, without the built-in table.
    pub fn from_json(json: &str) -> Result<Self, MappingError> {
        let mut registry = Self::new();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Adds or replaces a mapping, returning the one it replaced.
    pub fn insert(&mut self, mapping: NodeTypeMapping) -> Option<NodeTypeMapping> {
        self.mappings.insert(mapping.source_type.clone(), mapping)
    }

    /// Registers `source_type` as another name for the mapping of `known_source_type`.
    ///
    /// Returns `false` if `known_source_type` has no mapping.
    pub fn alias(&mut self, source_type: &str, known_source_type: &str) -> bool {
        let Some(known) = self.mappings.get(known_source_type) else {
            return false;
        };
        let mapping = NodeTypeMapping {
            source_type: source_type.to_string(),
            ..known.clone()
        };
        self.insert(mapping);
        true
    }

    /// Merges a JSON array of mappings into this registry. Returns how many were merged.
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize, MappingError> {
        let entries: Vec<NodeTypeMapping> =
            serde_json::from_str(json).map_err(|e| MappingError::Json(e.to_string()))?;
        for entry in &entries {
            entry.check()?;
        }
        let count = entries.len();
        for entry in entries {
            self.insert(entry);
        }
        Ok(count)
    }

    pub fn with_fuzzy_resolver(mut self, fuzzy: FuzzyResolver) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Exact lookup by source type.
    pub fn lookup(&self, source_type: &str) -> Option<&NodeTypeMapping> {
        self.mappings.get(source_type)
    }

    /// Keyword-based fallback for types without an exact entry.
    pub fn resolve_fuzzy(&self, source_type: &str) -> Option<&NodeTypeMapping> {
        let rule = self.fuzzy.rule_for(source_type)?;
        self.lookup(rule.mapping_key)
    }

    /// Exact lookup, falling back to the fuzzy resolver.
    pub fn resolve(&self, source_type: &str) -> Option<Resolution<'_>> {
        if let Some(mapping) = self.lookup(source_type) {
            return Some(Resolution {
                mapping,
                kind: MatchKind::Exact,
            });
        }
        self.resolve_fuzzy(source_type).map(|mapping| Resolution {
            mapping,
            kind: MatchKind::Fuzzy,
        })
    }

    pub fn list_supported_types(&self) -> BTreeSet<&str> {
        self.mappings.keys().map(String::as_str).collect()
    }

    /// Distinct categories of the registered mappings, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.mappings
            .values()
            .map(|m| m.category.as_str())
            .unique()
            .sorted()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
