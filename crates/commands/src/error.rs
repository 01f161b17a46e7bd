use tabclust_service::ServiceError;
use thiserror::Error;

/// Anything that turns a request line into an `{"error": ...}` response.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The line is not JSON, or lacks an `action`.
    #[error("parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("invalid payload for {action}: {source}")]
    InvalidPayload {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The operation itself failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The result could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl CommandError {
    /// Whether the host could resend the same request and expect it to work,
    /// e.g. when the store was busy.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Service(e) if e.is_transient())
    }
}

#[cfg(test)]
mod tests {
    use tabclust_storage::StorageError;

    use super::*;

    #[test]
    fn rejected_requests_are_not_transient() {
        assert!(!CommandError::UnknownAction("launchRocket".to_owned()).is_transient());
        let duplicate = ServiceError::Storage(StorageError::DuplicateGroup("Work".to_owned()));
        assert!(!CommandError::Service(duplicate).is_transient());
    }
}
