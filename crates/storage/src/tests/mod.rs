//! Test utilities and module declarations for storage tests.

use crate::Storage;
use tabclust_core::Tab;
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn tab(title: &str, url: &str) -> Tab {
    Tab::new(title, url)
}

mod group_tests;
mod tab_tests;
