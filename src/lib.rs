//! # Flowbridge - Workflow Graph Converter
//!
//! **Flowbridge** translates workflow exports of an automation tool (n8n-style:
//! typed nodes plus an adjacency map of connections keyed by node *name*) into
//! the node graph format of a browser-based visual editor (a flat array of
//! nodes and a flat array of links addressed by node id and slot number).
//!
//! ## Core Workflow
//!
//! 1.  **Decode**: Parse the export with `serde_json` into a `serde_json::Value`.
//! 2.  **Check**: Optionally run [`validate::validate`] for human-readable
//!     structural problems, or [`stats::conversion_stats`] to learn how much of
//!     the workflow the mapping registry understands.
//! 3.  **Convert**: Build a [`converter::WorkflowConverter`] (or use
//!     [`converter::convert_workflow`] for the defaults) and call `convert`.
//! 4.  **Serialize**: The resulting [`graph::TargetGraph`] serializes straight
//!     back to the editor's JSON format.
//!
//! Node types are resolved through a [`mapping::MappingRegistry`]: exact
//! entries first, then a keyword-based fuzzy fallback. Nodes that resolve to
//! nothing are dropped, and so are the links touching them; the conversion
//! confidence in [`stats::ConversionStats`] reports how much was lost.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowbridge::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let raw = json!({
//!         "name": "Notify",
//!         "nodes": [
//!             { "id": "1", "name": "Fetch", "type": "n8n-nodes-base.httpRequest",
//!               "position": [0, 0], "parameters": { "url": "https://example.com" } },
//!             { "id": "2", "name": "Post", "type": "n8n-nodes-base.slack",
//!               "position": [250, 0], "parameters": { "text": "{{ $json.title }}" } }
//!         ],
//!         "connections": {
//!             "Fetch": { "main": [[{ "node": "Post", "type": "main", "index": 0 }]] }
//!         }
//!     });
//!
//!     let stats = get_conversion_stats(&raw);
//!     println!("confidence: {:.2}", stats.conversion_confidence);
//!
//!     let converter = WorkflowConverter::builder()
//!         .with_type_alias("acme.httpClient", "n8n-nodes-base.httpRequest")
//!         .build();
//!     let graph = converter.convert_at(&raw, "2024-01-01T00:00:00Z")?;
//!     println!("{}", serde_json::to_string_pretty(&graph)?);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod converter;
pub mod error;
pub mod graph;
pub mod mapping;
pub mod prelude;
pub mod stats;
pub mod validate;
pub mod workflow;

#[cfg(feature = "python-bindings")]
mod python;
