//! Tab-supply collaborators for the suggestion pipeline.
//!
//! Both suggestion entry points run the same [`crate::TabGrouper`]; they
//! differ only in which [`TabSource`] feeds it.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tabclust_core::{PersistedTab, Tab};
use tabclust_storage::GroupStore;

use crate::ServiceError;

#[async_trait]
pub trait TabSource: Send + Sync {
    /// Current tab set, in the order the source holds it.
    async fn tabs(&self) -> Result<Vec<Tab>, ServiceError>;
}

/// Every persisted tab record across all groups.
pub struct StoredTabSource {
    store: Arc<dyn GroupStore>,
}

impl StoredTabSource {
    #[must_use]
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TabSource for StoredTabSource {
    async fn tabs(&self) -> Result<Vec<Tab>, ServiceError> {
        let records = self.store.list_all_tabs().await?;
        Ok(records.into_iter().map(PersistedTab::into_tab).collect())
    }
}

/// A fixed tab list. The default open-tab source is an empty one.
#[derive(Debug, Clone, Default)]
pub struct StaticTabSource {
    tabs: Vec<Tab>,
}

impl StaticTabSource {
    #[must_use]
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }
}

#[async_trait]
impl TabSource for StaticTabSource {
    async fn tabs(&self) -> Result<Vec<Tab>, ServiceError> {
        Ok(self.tabs.clone())
    }
}

/// A JSON array of `{title, url}` objects on disk, re-read on every call so
/// a host process can keep the snapshot current.
#[derive(Debug, Clone)]
pub struct JsonFileTabSource {
    path: PathBuf,
}

impl JsonFileTabSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TabSource for JsonFileTabSource {
    async fn tabs(&self) -> Result<Vec<Tab>, ServiceError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let tabs: Vec<Tab> = serde_json::from_str(&raw)?;
        tracing::debug!(path = %self.path.display(), count = tabs.len(), "Loaded open tabs snapshot");
        Ok(tabs)
    }
}
