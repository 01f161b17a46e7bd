//! Async trait implementation for `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use tabclust_core::{Group, GroupSummary, PersistedTab, Tab};

use crate::Storage;
use crate::error::StorageError;
use crate::traits::GroupStore;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Join(e.to_string()))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`   - `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`   - `.to_owned()` a `&str`, pass as `&arg`
/// - `@slice arg` - `.to_vec()` a `&[T]`, pass as `&arg`
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
}

#[async_trait]
impl GroupStore for Storage {
    async fn create_group(&self, name: &str) -> Result<Group, StorageError> {
        delegate!(self, create_group, @str name)
    }
    async fn get_group(&self, name: &str) -> Result<Option<Group>, StorageError> {
        delegate!(self, get_group, @str name)
    }
    async fn write_tabs(&self, group: &str, tabs: &[Tab]) -> Result<Group, StorageError> {
        delegate!(self, write_tabs, @str group, @slice tabs)
    }
    async fn read_tabs(&self, group: &str) -> Result<Vec<PersistedTab>, StorageError> {
        delegate!(self, read_tabs, @str group)
    }
    async fn remove_tab(&self, group: &str, tab: &Tab) -> Result<usize, StorageError> {
        delegate!(self, remove_tab, @str group, @ref tab)
    }
    async fn remove_group(&self, name: &str) -> Result<bool, StorageError> {
        delegate!(self, remove_group, @str name)
    }
    async fn rename_group(&self, old_name: &str, new_name: &str) -> Result<usize, StorageError> {
        delegate!(self, rename_group, @str old_name, @str new_name)
    }
    async fn list_group_names(&self) -> Result<Vec<String>, StorageError> {
        delegate!(self, list_group_names)
    }
    async fn list_groups(&self) -> Result<Vec<GroupSummary>, StorageError> {
        delegate!(self, list_groups)
    }
    async fn list_all_tabs(&self) -> Result<Vec<PersistedTab>, StorageError> {
        delegate!(self, list_all_tabs)
    }
}
