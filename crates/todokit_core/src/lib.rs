//! Core domain logic for TodoKit.
//! This crate is the single source of truth for task list invariants.

pub mod controller;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;
pub mod transfer;

pub use controller::{EditSession, InteractionState, TaskListController, ViewFilter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{new_task_id, Task, TaskId};
pub use storage::memory::MemoryStorage;
pub use storage::sqlite::{SqliteStorage, SCHEMA_VERSION};
pub use storage::{KeyValueStorage, StorageError, StorageResult};
pub use store::{StoreError, StoreResult, TaskStore, DEFAULT_STORAGE_KEY};
pub use transfer::{export_file_name, ExportError, ExportFile, ImportError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
