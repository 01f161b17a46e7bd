//! Async group store abstraction.
//!
//! The service layer depends on this trait rather than on [`crate::Storage`]
//! directly, so tests can run against in-memory fakes.

use async_trait::async_trait;
use tabclust_core::{Group, GroupSummary, PersistedTab, Tab};

use crate::error::StorageError;

/// Durable named groups of tabs.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Create an empty group. Fails with `DuplicateGroup` if the name is taken.
    async fn create_group(&self, name: &str) -> Result<Group, StorageError>;

    /// Group with its manifest, `None` if absent.
    async fn get_group(&self, name: &str) -> Result<Option<Group>, StorageError>;

    /// Merge tabs into a group by URL, creating the group if needed.
    async fn write_tabs(&self, group: &str, tabs: &[Tab]) -> Result<Group, StorageError>;

    /// Tab records of a group in insertion order.
    async fn read_tabs(&self, group: &str) -> Result<Vec<PersistedTab>, StorageError>;

    /// Delete records matching both URL and title. Returns the count removed.
    async fn remove_tab(&self, group: &str, tab: &Tab) -> Result<usize, StorageError>;

    /// Delete a group and its records. Returns `false` if nothing existed.
    async fn remove_group(&self, name: &str) -> Result<bool, StorageError>;

    /// Atomically rename a group and re-tag its records.
    async fn rename_group(&self, old_name: &str, new_name: &str) -> Result<usize, StorageError>;

    /// All group names, sorted.
    async fn list_group_names(&self) -> Result<Vec<String>, StorageError>;

    /// Every group with its tabs, rebuilt from the tab records.
    async fn list_groups(&self) -> Result<Vec<GroupSummary>, StorageError>;

    /// Every tab record across all groups.
    async fn list_all_tabs(&self) -> Result<Vec<PersistedTab>, StorageError>;
}
