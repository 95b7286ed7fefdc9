//! Runtime options for the path parser.
use crate::error::PathError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathConfig {
    /// The deepest expression nesting the parser will follow before giving up
    /// with `PathError::DepthExceeded`.
    ///
    /// Navigation lambdas are written by hand and rarely exceed a handful of
    /// levels. Defaults to `64`.
    pub max_depth: usize,

    /// Whether method-call arguments of an unrecognized shape (constants,
    /// comparisons, bare parameters) are dropped from the path.
    ///
    /// When `false`, such an argument fails the parse with
    /// `PathError::UnsupportedArgument`. Defaults to `true`.
    pub skip_unrecognized_arguments: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            skip_unrecognized_arguments: true,
        }
    }
}

impl PathConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, PathError> {
        let config: PathConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PathError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), PathError> {
        if self.max_depth == 0 {
            return Err(PathError::Config("maxDepth must be at least 1".to_string()));
        }
        Ok(())
    }
}
