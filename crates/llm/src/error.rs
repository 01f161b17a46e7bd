//! Failures of the completion endpoint used for group naming.
//!
//! None of these reach a caller of `suggest_name`: the namer logs them and
//! falls back to the default label.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("could not build HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),

    /// Connect, timeout, or body read failure.
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service returned {code}: {body}")]
    Status { code: u16, body: String },

    /// The body is not a completion object. `body` is truncated.
    #[error("unreadable completion body ({body}): {source}")]
    Malformed {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("completion returned no choices")]
    NoChoices,

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: usize, last: Box<LlmError> },
}

impl LlmError {
    /// Rate limiting, server-side failures and transport errors are retried.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { code, .. } => *code == 429 || (500..600).contains(code),
            _ => false,
        }
    }
}
