//! Embedding generation for tab similarity
//!
//! [`EmbeddingProvider`] is the seam the clustering pipeline depends on;
//! [`EmbeddingClient`] implements it against an OpenAI-compatible
//! `/v1/embeddings` endpoint.

mod client;
pub mod error;
mod page_text;
mod text;

use async_trait::async_trait;
use tabclust_core::Embedding;

pub use client::EmbeddingClient;
pub use error::EmbeddingError;
pub use page_text::{PageTextFetcher, extract_paragraph_text};
pub use text::truncate_words;

/// Turns text into a fixed-length vector.
///
/// Failures are returned, never panicked on; callers decide whether an
/// error means "no embedding" (the clustering pipeline always does).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;
}
