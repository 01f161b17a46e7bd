//! Typed error enum for the storage layer.
//!
//! Callers match on the group-level failures (duplicate, not found) and treat
//! the database/pool variants as a failed transaction: nothing was committed.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A group with this name already exists.
    #[error("group already exists: {0}")]
    DuplicateGroup(String),

    /// No group with this name.
    #[error("group not found: {0}")]
    GroupNotFound(String),

    /// Caller passed something that cannot be stored (empty name, empty url).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// SQL failure inside a statement or transaction.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Connection could not be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Row data could not be deserialized into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// Blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Pool(_) => true,
            Self::Database(rusqlite::Error::SqliteFailure(e, _)) => {
                matches!(e.code, rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            },
            _ => false,
        }
    }

    /// Whether this error is a name collision.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateGroup(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GroupNotFound(_))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::DataCorruption {
            context: "group manifest JSON".to_owned(),
            source: Box::new(err),
        }
    }
}

impl From<tabclust_core::CoreError> for StorageError {
    fn from(err: tabclust_core::CoreError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
