//! Task store over an injected key-value storage.
//!
//! # Responsibility
//! - Provide add/remove/toggle/edit/reorder/replace operations.
//! - Load the persisted snapshot at startup, absorbing unreadable data.
//!
//! # Invariants
//! - Unknown ids and blank adds are no-ops, not errors.
//! - `reorder` and `replace_all` validate their inputs and leave the list
//!   untouched on rejection.
//! - Log lines carry counts and ids only, never task text.

use super::{StoreError, StoreResult};
use crate::model::task::{find_duplicate_id, move_item, Task, TaskId};
use crate::storage::KeyValueStorage;
use crate::transfer::json::{decode_tasks, encode_tasks};
use log::{debug, error, info, warn};
use std::collections::HashSet;

/// Storage key holding the serialized task list.
pub const DEFAULT_STORAGE_KEY: &str = "todos";

/// Owner of the canonical task list.
pub struct TaskStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
}

impl<S: KeyValueStorage> TaskStore<S> {
    /// Loads the snapshot stored under [`DEFAULT_STORAGE_KEY`].
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Loads the snapshot stored under `key`.
    ///
    /// Never fails: a missing entry, a storage read error or an unparsable
    /// payload all produce an empty list.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tasks = read_snapshot(&storage, &key);
        Self {
            storage,
            key,
            tasks,
        }
    }

    /// Current canonical list.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_active()).count()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Releases the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Appends a new incomplete task.
    ///
    /// Blank text (after trim) is ignored and nothing is written.
    pub fn add(&mut self, text: impl Into<String>) -> StoreResult<&[Task]> {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("event=task_add module=store status=skipped reason=blank_text");
            return Ok(&self.tasks);
        }

        let task = Task::new(text);
        debug!("event=task_add module=store status=start task_id={}", task.id);
        let mut next = self.tasks.clone();
        next.push(task);
        self.commit("task_add", next)
    }

    /// Removes the task with `id`, if present.
    pub fn remove(&mut self, id: &str) -> StoreResult<&[Task]> {
        let Some(index) = self.position(id) else {
            return self.skip_unknown("task_remove", id);
        };
        let mut next = self.tasks.clone();
        next.remove(index);
        self.commit("task_remove", next)
    }

    /// Flips completion of the task with `id`, if present.
    pub fn toggle_completed(&mut self, id: &str) -> StoreResult<&[Task]> {
        let Some(index) = self.position(id) else {
            return self.skip_unknown("task_toggle", id);
        };
        let mut next = self.tasks.clone();
        next[index].completed = !next[index].completed;
        self.commit("task_toggle", next)
    }

    /// Replaces the text of the task with `id`, if present.
    ///
    /// Empty text is accepted here; only creation rejects blank input.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> StoreResult<&[Task]> {
        let Some(index) = self.position(id) else {
            return self.skip_unknown("task_set_text", id);
        };
        let mut next = self.tasks.clone();
        next[index].text = text.into();
        self.commit("task_set_text", next)
    }

    /// Moves the task at `from` to `to`, shifting the tasks in between.
    ///
    /// # Errors
    /// - `StoreError::IndexOutOfRange` when either index is not `< len()`.
    pub fn reorder(&mut self, from: usize, to: usize) -> StoreResult<&[Task]> {
        let len = self.tasks.len();
        for index in [from, to] {
            if index >= len {
                warn!(
                    "event=task_reorder module=store status=rejected error_code=index_out_of_range index={index} len={len}"
                );
                return Err(StoreError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(&self.tasks);
        }

        let mut next = self.tasks.clone();
        move_item(&mut next, from, to);
        self.commit("task_reorder", next)
    }

    /// Replaces the whole list.
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` when two tasks share an id.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> StoreResult<&[Task]> {
        if let Some(id) = find_duplicate_id(&tasks) {
            warn!(
                "event=task_replace_all module=store status=rejected error_code=duplicate_id task_id={id}"
            );
            return Err(StoreError::DuplicateId(id.clone()));
        }
        self.commit("task_replace_all", tasks)
    }

    fn skip_unknown(&self, event: &str, id: &str) -> StoreResult<&[Task]> {
        debug!("event={event} module=store status=skipped reason=unknown_id task_id={id}");
        Ok(&self.tasks)
    }

    fn commit(&mut self, event: &str, next: Vec<Task>) -> StoreResult<&[Task]> {
        let encoded = encode_tasks(&next).map_err(StoreError::Encode)?;
        if let Err(err) = self.storage.set(&self.key, &encoded) {
            error!(
                "event={event} module=store status=error error_code=persist_failed error={err}"
            );
            return Err(err.into());
        }

        self.tasks = next;
        info!(
            "event={event} module=store status=ok count={}",
            self.tasks.len()
        );
        Ok(&self.tasks)
    }
}

fn read_snapshot<S: KeyValueStorage>(storage: &S, key: &str) -> Vec<Task> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=store_load module=store status=ok source=none count=0");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    let tasks = match decode_tasks(&raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded error_code=parse_failed error={err}"
            );
            return Vec::new();
        }
    };

    let loaded = tasks.len();
    let tasks = dedupe_by_id(tasks);
    if tasks.len() != loaded {
        warn!(
            "event=store_load module=store status=degraded error_code=duplicate_id dropped={}",
            loaded - tasks.len()
        );
    }
    info!(
        "event=store_load module=store status=ok source=snapshot count={}",
        tasks.len()
    );
    tasks
}

/// Keeps the first task for every id, preserving order.
fn dedupe_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{dedupe_by_id, TaskStore};
    use crate::model::task::Task;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let tasks = vec![
            Task::with_id("a", "first"),
            Task::with_id("b", "second"),
            Task::with_id("a", "shadow"),
        ];
        let deduped = dedupe_by_id(tasks);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].text, "first");
    }

    #[test]
    fn no_op_mutations_do_not_write() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(&storage);

        store.add("   ").unwrap();
        store.remove("missing").unwrap();
        store.toggle_completed("missing").unwrap();
        store.set_text("missing", "x").unwrap();

        assert_eq!(storage.raw("todos"), None);
    }

    #[test]
    fn custom_key_is_used_for_reads_and_writes() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load_with_key(&storage, "work");
        store.add("ship it").unwrap();

        assert_eq!(store.storage_key(), "work");
        assert!(storage.raw("work").is_some());
        assert!(storage.raw("todos").is_none());
    }
}
