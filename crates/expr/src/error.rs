use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Lambda parse error in '{0}': {1}")]
    ExprParse(String, String),

    #[error("Expression nests deeper than the parser limit of {limit}")]
    NestingTooDeep { limit: usize },
}
