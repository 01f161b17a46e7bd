//! `SQLite` group store.
//!
//! All methods are synchronous; [`crate::GroupStore`] wraps them for async callers.

mod groups;
mod tabs;

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use tabclust_core::constants::DEFAULT_DB_POOL_SIZE;
use tabclust_core::{PersistedTab, Tab};

use crate::StorageError;
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Group store wrapping a `SQLite` connection pool.
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Parse JSON from string, converting error to rusqlite error
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(s: &str) -> rusqlite::Result<T> {
    serde_json::from_str(s).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Map a `tabs` row (`id, title, url, group_name`) to a record.
pub(crate) fn map_persisted_tab(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersistedTab> {
    Ok(PersistedTab { id: row.get(0)?, title: row.get(1)?, url: row.get(2)?, group: row.get(3)? })
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

pub(crate) fn validate_group_name(name: &str) -> Result<(), StorageError> {
    if name.trim().is_empty() {
        return Err(StorageError::InvalidInput("group name must not be empty".to_owned()));
    }
    Ok(())
}

pub(crate) fn validate_tabs(tabs: &[Tab]) -> Result<(), StorageError> {
    tabs.iter().try_for_each(|t| t.validate().map_err(StorageError::from))
}

/// Custom connection initializer for concurrency settings
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

impl Storage {
    /// Opens (creating if needed) the store at `db_path` with the default pool size.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_pool_size(db_path, DEFAULT_DB_POOL_SIZE)
    }

    /// Opens the store and runs pending migrations on the first connection.
    pub fn with_pool_size(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(pool_size, path = %db_path.display(), "Storage initialized with connection pool");

        Ok(Self { pool })
    }

    /// Runs `f` inside an IMMEDIATE transaction: committed when `f` returns
    /// `Ok`, rolled back when it returns `Err` or unwinds (the transaction is
    /// dropped uncommitted). IMMEDIATE takes the write lock up front so two
    /// merge-writes on the same group cannot interleave their read and write.
    pub(crate) fn with_transaction<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
    {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Releases pooled connections. WAL contents are checkpointed first.
    pub fn close(self) {
        match get_conn(&self.pool) {
            Ok(conn) => {
                if let Err(e) = conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(())) {
                    tracing::warn!("WAL checkpoint on close failed: {}", e);
                }
            },
            Err(e) => tracing::warn!("Could not check out connection on close: {}", e),
        }
        drop(self.pool);
        tracing::info!("Storage closed");
    }
}
