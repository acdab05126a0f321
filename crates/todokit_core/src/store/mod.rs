//! Canonical task list ownership and write-through persistence.
//!
//! # Responsibility
//! - Own the single authoritative ordered task list.
//! - Persist a full snapshot through `KeyValueStorage` on every mutation.
//!
//! # Invariants
//! - Task ids are unique after every mutation.
//! - The in-memory list only changes after its snapshot write succeeded.

pub mod task_store;

use crate::model::task::TaskId;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use task_store::{TaskStore, DEFAULT_STORAGE_KEY};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from task store mutations.
#[derive(Debug)]
pub enum StoreError {
    /// A reorder index is not a valid position in the current list.
    IndexOutOfRange { index: usize, len: usize },
    /// A replacement list contains the same id more than once.
    DuplicateId(TaskId),
    /// The snapshot could not be serialized.
    Encode(serde_json::Error),
    /// The snapshot could not be written.
    Storage(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} is out of range for list of {len}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate task id: {id}"),
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::IndexOutOfRange { .. } | Self::DuplicateId(_) => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
