use rusqlite::{Connection, params};
use tabclust_core::{Group, GroupSummary, PersistedTab, Tab, merge_tabs, net_new_tabs};

use super::groups::write_manifest;
use super::{Storage, get_conn, log_row_error, map_persisted_tab, validate_group_name, validate_tabs};
use crate::StorageError;

const SELECT_TABS: &str = "SELECT id, title, url, group_name FROM tabs";

fn group_records(conn: &Connection, group: &str) -> rusqlite::Result<Vec<PersistedTab>> {
    let mut stmt = conn.prepare(&format!("{SELECT_TABS} WHERE group_name = ?1 ORDER BY id"))?;
    let records = stmt.query_map(params![group], map_persisted_tab)?.filter_map(log_row_error).collect();
    Ok(records)
}

impl Storage {
    /// Merge-write: appends the tabs whose URL the group does not already
    /// hold, creating the group if needed. Returns the group as it stands
    /// afterwards. Writing the same tabs twice is a no-op the second time.
    pub fn write_tabs(&self, group: &str, tabs: &[Tab]) -> Result<Group, StorageError> {
        validate_group_name(group)?;
        validate_tabs(tabs)?;

        self.with_transaction(|tx| {
            let existing: Vec<Tab> =
                group_records(tx, group)?.into_iter().map(PersistedTab::into_tab).collect();
            let fresh = net_new_tabs(&existing, tabs);

            let now = super::now_rfc3339();
            {
                let mut insert = tx.prepare_cached(
                    "INSERT INTO tabs (group_name, title, url, created_at) VALUES (?1, ?2, ?3, ?4)",
                )?;
                for tab in &fresh {
                    insert.execute(params![group, tab.title, tab.url, now])?;
                }
            }

            let merged = merge_tabs(&existing, &fresh);
            write_manifest(tx, group, &merged)?;

            tracing::debug!(group = %group, added = fresh.len(), total = merged.len(), "Tabs written");
            Ok(Group { name: group.to_owned(), tabs: merged })
        })
    }

    /// Tab records of one group in insertion order. Empty for an unknown group.
    pub fn read_tabs(&self, group: &str) -> Result<Vec<PersistedTab>, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(group_records(&conn, group)?)
    }

    /// Deletes records in `group` matching both the URL and the title of
    /// `tab`. Returns how many went; zero is not an error.
    pub fn remove_tab(&self, group: &str, tab: &Tab) -> Result<usize, StorageError> {
        self.with_transaction(|tx| {
            let removed = tx.execute(
                "DELETE FROM tabs WHERE group_name = ?1 AND url = ?2 AND title = ?3",
                params![group, tab.url, tab.title],
            )?;
            if removed > 0 {
                let remaining: Vec<Tab> =
                    group_records(tx, group)?.into_iter().map(PersistedTab::into_tab).collect();
                if super::groups::group_exists(tx, group)? {
                    write_manifest(tx, group, &remaining)?;
                }
            }
            tracing::debug!(group = %group, url = %tab.url, removed, "Tab removed");
            Ok(removed)
        })
    }

    /// Every tab record across all groups, in insertion order.
    pub fn list_all_tabs(&self) -> Result<Vec<PersistedTab>, StorageError> {
        self.scan_tabs(None, |rows| rows.collect())
    }

    /// Groups rebuilt from the tab records, in the order each group was first
    /// seen. Groups without records do not appear.
    pub fn list_groups(&self) -> Result<Vec<GroupSummary>, StorageError> {
        self.scan_tabs(None, |rows| {
            let mut groups: Vec<GroupSummary> = Vec::new();
            for record in rows {
                let tab = Tab::new(record.title, record.url);
                match groups.iter_mut().find(|g| g.group_name == record.group) {
                    Some(g) => g.tabs.push(tab),
                    None => groups.push(GroupSummary { group_name: record.group, tabs: vec![tab] }),
                }
            }
            groups
        })
    }

    /// Streams tab records (optionally of one group) through `f` without
    /// collecting them first. Unreadable rows are logged and skipped.
    pub fn scan_tabs<T, F>(&self, group: Option<&str>, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut dyn Iterator<Item = PersistedTab>) -> T,
    {
        let conn = get_conn(&self.pool)?;
        match group {
            Some(name) => {
                let mut stmt =
                    conn.prepare(&format!("{SELECT_TABS} WHERE group_name = ?1 ORDER BY id"))?;
                let mut rows = stmt.query_map(params![name], map_persisted_tab)?.filter_map(log_row_error);
                Ok(f(&mut rows))
            },
            None => {
                let mut stmt = conn.prepare(&format!("{SELECT_TABS} ORDER BY id"))?;
                let mut rows = stmt.query_map([], map_persisted_tab)?.filter_map(log_row_error);
                Ok(f(&mut rows))
            },
        }
    }
}
