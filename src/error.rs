use thiserror::Error;

/// Errors that abort a whole-workflow conversion.
///
/// Unsupported nodes and unresolved links are not errors: they are dropped from
/// the output graph and only show up in the conversion statistics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Input is not a workflow: {0}")]
    InvalidWorkflow(String),

    #[error(
        "Node name '{name}' is used by both node '{first_id}' and node '{second_id}'; connections cannot be resolved unambiguously"
    )]
    DuplicateNodeName {
        name: String,
        first_id: String,
        second_id: String,
    },
}

/// Errors that can occur while loading extension entries into a mapping registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("Failed to parse mapping table JSON: {0}")]
    Json(String),

    #[error("Mapping entry for '{source_type}' is invalid: {message}")]
    InvalidEntry {
        source_type: String,
        message: String,
    },
}
