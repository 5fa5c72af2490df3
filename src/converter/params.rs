use serde_json::{Map, Value};

/// The shapes a parameter value can take, as far as rewriting is concerned.
#[derive(Debug, PartialEq)]
pub enum ParamShape<'a> {
    /// `{{ $json.field }}`-style reference to upstream item data. Left as is.
    FieldReference(&'a str),
    /// `{{ $env.NAME }}` reference to an environment variable.
    EnvReference { name: &'a str },
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> ParamShape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => ParamShape::Mapping(map),
            Value::Array(items) => ParamShape::Sequence(items),
            Value::String(text) => match template_body(text) {
                Some(body) => match body.strip_prefix("$env.") {
                    Some(name) if is_identifier(name) => ParamShape::EnvReference { name },
                    _ if body.starts_with("$json") => ParamShape::FieldReference(text),
                    _ => ParamShape::Scalar(value),
                },
                None => ParamShape::Scalar(value),
            },
            other => ParamShape::Scalar(other),
        }
    }
}

/// Rewrites a source parameter value into the target representation.
///
/// Environment references become `{{config.NAME}}` with the name upper-cased;
/// mappings and sequences are rewritten element-wise.
pub fn convert_value(value: &Value) -> Value {
    match ParamShape::of(value) {
        ParamShape::EnvReference { name } => {
            Value::String(format!("{{{{config.{}}}}}", name.to_uppercase()))
        }
        ParamShape::FieldReference(text) => Value::String(text.to_string()),
        ParamShape::Mapping(map) => Value::Object(
            map.iter()
                .map(|(key, v)| (key.clone(), convert_value(v)))
                .collect(),
        ),
        ParamShape::Sequence(items) => Value::Array(items.iter().map(convert_value).collect()),
        ParamShape::Scalar(scalar) => scalar.clone(),
    }
}

/// The trimmed expression inside `{{ ... }}`, if `text` is exactly one template.
///
/// A leading `=` (expression marker) is accepted.
fn template_body(text: &str) -> Option<&str> {
    let text = text.trim();
    let text = text.strip_prefix('=').unwrap_or(text).trim_start();
    let inner = text.strip_prefix("{{")?.strip_suffix("}}")?;
    if inner.contains("{{") || inner.contains("}}") {
        return None;
    }
    Some(inner.trim())
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
