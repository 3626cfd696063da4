use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected an array of patent records or a single record object, found {found}")]
    NotACollection { found: &'static str },

    #[error("element {index} is not a record object (found {found})")]
    NotARecord { index: usize, found: &'static str },

    #[error("invalid sort rules: {0}")]
    InvalidRules(String),
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
