//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Keep task snapshots in a single `kv_entries` table.
//! - Create that table on first open and refuse files from newer builds.
//!
//! # Invariants
//! - `PRAGMA user_version` records the entry table layout.
//! - `set` is an upsert; one row per key.

use super::{KeyValueStorage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Layout version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_ENTRIES_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);";

/// Key-value storage over an owned SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) a storage file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        let opened = Connection::open(path)
            .map_err(StorageError::from)
            .and_then(Self::from_connection);
        log_open("file", started_at, &opened);
        opened
    }

    /// Opens a throwaway storage that lives as long as the value.
    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        let opened = Connection::open_in_memory()
            .map_err(StorageError::from)
            .and_then(Self::from_connection);
        log_open("memory", started_at, &opened);
        opened
    }

    /// Wraps an existing connection, creating the entry table if needed.
    ///
    /// # Errors
    /// - `UnsupportedSchemaVersion` when the file was written by a newer build.
    pub fn from_connection(mut conn: Connection) -> StorageResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        ensure_schema(&mut conn)?;
        Ok(Self { conn })
    }

    /// Underlying connection, for diagnostics.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_schema(conn: &mut Connection) -> StorageResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_ENTRIES_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}

fn log_open(mode: &str, started_at: Instant, opened: &StorageResult<SqliteStorage>) {
    let duration_ms = started_at.elapsed().as_millis();
    match opened {
        Ok(_) => info!(
            "event=storage_open module=storage status=ok mode={mode} duration_ms={duration_ms}"
        ),
        Err(err) => error!(
            "event=storage_open module=storage status=error mode={mode} duration_ms={duration_ms} error={err}"
        ),
    }
}
