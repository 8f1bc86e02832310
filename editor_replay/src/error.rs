//! Error types for batch replay

use thiserror::Error;

use crate::command::CommandError;

/// Configuration error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Editor error
///
/// Only malformed input is an error. Benign conditions (backspace on an empty
/// buffer, undo with no history, bold without a selection) are silently ignored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Invalid command at record {index}: {source}")]
    InvalidCommand {
        index: usize,
        #[source]
        source: CommandError,
    },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;
