//! Typed error enum for the service layer.
//!
//! Embedding and naming failures never reach this type: the grouper absorbs
//! them into absent embeddings and fallback labels. What is left is storage,
//! bad input, and configuration.

use tabclust_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (empty name, malformed tab list).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Required collaborator is not configured.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// A tab source file or the data directory could not be accessed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed in the service layer.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_transient())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<tabclust_core::CoreError> for ServiceError {
    fn from(err: tabclust_core::CoreError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
