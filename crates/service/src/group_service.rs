use std::sync::Arc;

use tabclust_core::{Group, GroupSummary, PersistedTab, Tab};
use tabclust_storage::GroupStore;

use crate::ServiceError;

/// Group-store operations as the command layer sees them.
#[derive(Clone)]
pub struct GroupService {
    store: Arc<dyn GroupStore>,
}

fn require_name(name: &str, what: &str) -> Result<(), ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

impl GroupService {
    #[must_use]
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }

    pub async fn create_group(&self, name: &str) -> Result<Group, ServiceError> {
        require_name(name, "group name")?;
        Ok(self.store.create_group(name).await?)
    }

    pub async fn write_tabs(&self, group: &str, tabs: &[Tab]) -> Result<Group, ServiceError> {
        require_name(group, "group name")?;
        for tab in tabs {
            tab.validate()?;
        }
        Ok(self.store.write_tabs(group, tabs).await?)
    }

    pub async fn read_tabs(&self, group: &str) -> Result<Vec<PersistedTab>, ServiceError> {
        Ok(self.store.read_tabs(group).await?)
    }

    pub async fn remove_tab(&self, group: &str, tab: &Tab) -> Result<usize, ServiceError> {
        Ok(self.store.remove_tab(group, tab).await?)
    }

    pub async fn remove_group(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(self.store.remove_group(name).await?)
    }

    pub async fn rename_group(&self, old_name: &str, new_name: &str) -> Result<usize, ServiceError> {
        require_name(new_name, "new group name")?;
        Ok(self.store.rename_group(old_name, new_name).await?)
    }

    pub async fn group_names(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.store.list_group_names().await?)
    }

    pub async fn groups(&self) -> Result<Vec<GroupSummary>, ServiceError> {
        Ok(self.store.list_groups().await?)
    }

    pub async fn all_tabs(&self) -> Result<Vec<PersistedTab>, ServiceError> {
        Ok(self.store.list_all_tabs().await?)
    }
}
