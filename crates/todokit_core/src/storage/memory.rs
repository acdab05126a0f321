//! In-memory storage for tests and ephemeral sessions.

use super::{KeyValueStorage, StorageResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// Single-threaded in-memory key-value storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with one raw entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().insert(key.into(), value.into());
        storage
    }

    /// Returns the raw stored value without going through the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
