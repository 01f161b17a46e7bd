use rusqlite::{Connection, OptionalExtension, params};
use tabclust_core::{Group, Tab};

use super::{
    Storage, get_conn, log_row_error, now_rfc3339, parse_json, validate_group_name,
};
use crate::StorageError;

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

pub(super) fn group_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row("SELECT 1 FROM tab_groups WHERE name = ?1", params![name], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
}

pub(super) fn read_manifest(conn: &Connection, name: &str) -> rusqlite::Result<Option<Vec<Tab>>> {
    conn.query_row("SELECT tabs FROM tab_groups WHERE name = ?1", params![name], |row| {
        parse_json(&row.get::<_, String>(0)?)
    })
    .optional()
}

pub(super) fn write_manifest(conn: &Connection, name: &str, tabs: &[Tab]) -> Result<(), StorageError> {
    let now = now_rfc3339();
    conn.execute(
        "INSERT INTO tab_groups (name, tabs, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)
         ON CONFLICT(name) DO UPDATE SET tabs = excluded.tabs, updated_at = excluded.updated_at",
        params![name, serde_json::to_string(tabs)?, now],
    )?;
    Ok(())
}

impl Storage {
    /// Creates an empty group.
    ///
    /// # Errors
    /// `DuplicateGroup` if the name is taken.
    pub fn create_group(&self, name: &str) -> Result<Group, StorageError> {
        validate_group_name(name)?;
        self.with_transaction(|tx| {
            if group_exists(tx, name)? {
                return Err(StorageError::DuplicateGroup(name.to_owned()));
            }
            let now = now_rfc3339();
            tx.execute(
                "INSERT INTO tab_groups (name, tabs, created_at, updated_at) VALUES (?1, '[]', ?2, ?2)",
                params![name, now],
            )
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StorageError::DuplicateGroup(name.to_owned())
                } else {
                    StorageError::Database(e)
                }
            })?;
            tracing::info!(group = %name, "Group created");
            Ok(Group::empty(name))
        })
    }

    /// Group record with its tab manifest, `None` if absent.
    pub fn get_group(&self, name: &str) -> Result<Option<Group>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let manifest = read_manifest(&conn, name)?;
        Ok(manifest.map(|tabs| Group { name: name.to_owned(), tabs }))
    }

    pub fn list_group_names(&self) -> Result<Vec<String>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare("SELECT name FROM tab_groups ORDER BY name")?;
        let names = stmt.query_map([], |row| row.get(0))?.filter_map(log_row_error).collect();
        Ok(names)
    }

    /// Re-keys the group record and re-tags every tab record it owns, in one
    /// transaction. Returns the number of tab records moved.
    ///
    /// # Errors
    /// `GroupNotFound` if `old_name` is absent, `DuplicateGroup` if
    /// `new_name` is already taken. Either way nothing changes.
    pub fn rename_group(&self, old_name: &str, new_name: &str) -> Result<usize, StorageError> {
        validate_group_name(new_name)?;
        self.with_transaction(|tx| {
            if !group_exists(tx, old_name)? {
                return Err(StorageError::GroupNotFound(old_name.to_owned()));
            }
            if old_name == new_name {
                return Ok(0);
            }
            if group_exists(tx, new_name)? {
                return Err(StorageError::DuplicateGroup(new_name.to_owned()));
            }

            tx.execute(
                "UPDATE tab_groups SET name = ?1, updated_at = ?2 WHERE name = ?3",
                params![new_name, now_rfc3339(), old_name],
            )?;
            let moved = tx.execute(
                "UPDATE tabs SET group_name = ?1 WHERE group_name = ?2",
                params![new_name, old_name],
            )?;

            tracing::info!(from = %old_name, to = %new_name, tabs = moved, "Group renamed");
            Ok(moved)
        })
    }

    /// Deletes the group record and the tab records it owns. Records with the
    /// same URL under other groups are independent and stay.
    /// Returns `false` if there was nothing to delete.
    pub fn remove_group(&self, name: &str) -> Result<bool, StorageError> {
        self.with_transaction(|tx| {
            let tabs_deleted =
                tx.execute("DELETE FROM tabs WHERE group_name = ?1", params![name])?;
            let groups_deleted =
                tx.execute("DELETE FROM tab_groups WHERE name = ?1", params![name])?;

            tracing::info!(group = %name, tabs = tabs_deleted, "Group removed");
            Ok(tabs_deleted > 0 || groups_deleted > 0)
        })
    }
}
