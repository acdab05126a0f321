//! Durable key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Define the minimal `get`/`set` contract the task store persists through.
//! - Provide an in-memory fake and a SQLite-backed durable implementation.
//!
//! # Invariants
//! - One key holds one complete serialized value; writes replace it wholesale.
//! - Implementations never interpret stored values.

pub mod memory;
pub mod sqlite;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by storage backends.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The entry table was created by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "storage query failed: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value storage used for task snapshots.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
