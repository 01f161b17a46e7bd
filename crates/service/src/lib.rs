//! Service layer for tabclust
//!
//! Composes embeddings, clustering and naming into group suggestions, and
//! fronts the group store for the command layer.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]

mod context;
mod error;
mod group_service;
mod grouper;
mod tab_source;

pub use context::AppContext;
pub use error::ServiceError;
pub use group_service::GroupService;
pub use grouper::TabGrouper;
pub use tab_source::{JsonFileTabSource, StaticTabSource, StoredTabSource, TabSource};
