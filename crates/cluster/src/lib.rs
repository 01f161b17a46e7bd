//! Similarity graph and connected-component clustering over tab sets.
//!
//! Pure computation: embeddings are supplied by the caller, nothing here does I/O.

#![allow(clippy::missing_errors_doc, reason = "No fallible API")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]

mod clusterer;
mod similarity;

pub use clusterer::Clusterer;
pub use similarity::{Neighbor, SimilarityGraph, dot_product, pair_score};
