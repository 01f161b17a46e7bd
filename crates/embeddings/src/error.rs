//! Typed error enum for the embeddings crate.

use thiserror::Error;

/// Errors from embedding generation and page text retrieval.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding input is empty")]
    EmptyInput,
    #[error("no API key configured")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("malformed embedding response: {0}")]
    MalformedResponse(String),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
