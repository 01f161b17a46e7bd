use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while validating domain values and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown embedding source: {0} (expected \"title\" or \"page\")")]
    UnknownEmbeddingSource(String),
}

pub type Result<T> = StdResult<T, CoreError>;
