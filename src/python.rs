use crate::converter::convert_workflow as convert;
use crate::stats::{ConversionStats, get_conversion_stats};
use crate::validate::validate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde_json::Value;

impl<'py> IntoPyObject<'py> for ConversionStats {
    type Target = PyDict;
    type Output = Bound<'py, Self::Target>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> Result<Self::Output, Self::Error> {
        let dict = PyDict::new(py);
        dict.set_item("total_nodes", self.total_nodes)?;
        dict.set_item("supported_nodes", self.supported_nodes)?;
        dict.set_item("partially_supported_nodes", self.partially_supported_nodes)?;
        dict.set_item("unsupported_nodes", self.unsupported_nodes)?;
        dict.set_item(
            "supported_types",
            self.supported_types.into_iter().collect::<Vec<_>>(),
        )?;
        dict.set_item(
            "partially_supported_types",
            self.partially_supported_types.into_iter().collect::<Vec<_>>(),
        )?;
        dict.set_item(
            "unsupported_types",
            self.unsupported_types.into_iter().collect::<Vec<_>>(),
        )?;
        dict.set_item("conversion_confidence", self.conversion_confidence)?;
        Ok(dict)
    }
}

fn parse(workflow_json: &str) -> PyResult<Value> {
    serde_json::from_str(workflow_json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Converts a workflow export into a visual-editor graph.
///
/// Args:
///     workflow_json (str): The workflow export as a JSON string.
///
/// Returns:
///     str: The converted graph as a JSON string.
///
/// Raises:
///     ValueError: If the input is not valid JSON or not a workflow.
#[pyfunction]
fn convert_workflow(workflow_json: &str) -> PyResult<String> {
    let graph = convert(&parse(workflow_json)?).map_err(|e| PyValueError::new_err(e.to_string()))?;
    serde_json::to_string(&graph).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Counts how many nodes of a workflow export can be converted.
///
/// Returns:
///     dict: Node counts per support level, the type names in each level and
///         the overall ``conversion_confidence`` between 0 and 1.
#[pyfunction]
fn conversion_stats(workflow_json: &str) -> PyResult<ConversionStats> {
    Ok(get_conversion_stats(&parse(workflow_json)?))
}

/// Lists structural problems of a workflow export. An empty list means valid.
#[pyfunction]
fn validate_workflow(workflow_json: &str) -> PyResult<Vec<String>> {
    Ok(validate(&parse(workflow_json)?))
}

/// Workflow export to visual-editor graph conversion.
#[pymodule]
fn flowbridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert_workflow, m)?)?;
    m.add_function(wrap_pyfunction!(conversion_stats, m)?)?;
    m.add_function(wrap_pyfunction!(validate_workflow, m)?)?;
    Ok(())
}
