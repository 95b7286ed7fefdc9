// src/error.rs
use include_path_expr::ExprError;
use thiserror::Error;

/// The error type for path parsing and include operations.
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Unsupported expression shape of type '{type_name}': {expression}")]
    UnsupportedExpressionShape { type_name: String, expression: String },

    #[error("Unsupported argument of type '{type_name}' in call to '{method}': {expression}")]
    UnsupportedArgument {
        method: String,
        type_name: String,
        expression: String,
    },

    #[error("Expression nests deeper than the configured limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("Expression parsing failed: {0}")]
    Expression(#[from] ExprError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
