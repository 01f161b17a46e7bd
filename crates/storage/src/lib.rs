//! Storage layer for tabclust
//!
//! SQLite-backed group store. Two tables mirror the persisted schema: groups
//! keyed by name carrying a tab manifest, and tab records with an
//! autoincrement id and an index on the owning group. Every compound
//! operation runs in a single transaction.

mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use storage::Storage;
pub use traits::GroupStore;
