//! Prelude module for convenient imports
//!
//! Re-exports the types and functions most callers need.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowbridge::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/workflow.json")?;
//! let raw: serde_json::Value = serde_json::from_str(&text)?;
//!
//! for problem in validate(&raw) {
//!     eprintln!("warning: {}", problem);
//! }
//! let graph = convert_workflow(&raw)?;
//! println!("{} nodes, {} links", graph.nodes.len(), graph.links.len());
//! # Ok(())
//! # }
//! ```

// Conversion
pub use crate::converter::{
    DuplicateNamePolicy, EndpointMatching, OriginSlots, WorkflowConverter, convert_workflow,
};

// Source and target models
pub use crate::graph::{InputPort, Link, OutputPort, TargetGraph, TargetNode};
pub use crate::workflow::{SourceConnectionLink, SourceNode, SourceWorkflow, normalize};

// Type mapping
pub use crate::mapping::{MappingRegistry, MatchKind, NodeTypeMapping};

// Checks and statistics
pub use crate::catalog::{CatalogEntry, inspect};
pub use crate::stats::{ConversionStats, conversion_stats, get_conversion_stats};
pub use crate::validate::validate;

// Error types
pub use crate::error::{ConvertError, MappingError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
