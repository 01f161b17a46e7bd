//! Core types and configuration for tabclust
//!
//! This crate contains domain types shared across all other crates.

mod api_key;
pub mod constants;
mod dedup;
pub mod env_config;
mod error;
mod settings;
mod tab;

pub use api_key::ApiKey;
pub use dedup::{merge_tabs, net_new_tabs};
pub use error::{CoreError, Result};
pub use settings::{EmbeddingSource, Settings};
pub use tab::{Embedding, Group, GroupSummary, PersistedTab, Tab, TabKey};
