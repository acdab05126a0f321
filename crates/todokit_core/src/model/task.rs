//! Task domain model.
//!
//! # Responsibility
//! - Define the flat `{id, text, completed}` record used for persistence,
//!   import and export.
//! - Provide constructors and list validation used by store write paths.
//!
//! # Invariants
//! - `id` is immutable once assigned and unique within one list.
//! - Editing `text` or `completed` never changes `id`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Stable identifier for one task.
///
/// Kept as a string because imported files carry arbitrary ids from other
/// sessions; freshly created tasks use UUID v4 text.
pub type TaskId = String;

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Free-form content. Snapshots written by older builds used `content`.
    ///
    /// A record carrying both `text` and `content` is a duplicate-field
    /// error, which fails the whole list it belongs to.
    #[serde(alias = "content")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(new_task_id(), text)
    }

    /// Creates an incomplete task with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }

    /// Returns whether this task still needs doing.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// Generates a new task id.
pub fn new_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// Returns the first id that appears more than once, if any.
pub fn find_duplicate_id(tasks: &[Task]) -> Option<&TaskId> {
    let mut seen = HashSet::with_capacity(tasks.len());
    tasks.iter().map(|task| &task.id).find(|id| !seen.insert(*id))
}

/// Moves the element at `from` to `to`, shifting everything in between.
///
/// Both indices must be in bounds; callers check this first.
pub(crate) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::{find_duplicate_id, move_item, new_task_id, Task};

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(new_task_id(), new_task_id());
    }

    #[test]
    fn find_duplicate_id_reports_first_repeat() {
        let tasks = vec![
            Task::with_id("a", "one"),
            Task::with_id("b", "two"),
            Task::with_id("a", "three"),
        ];
        assert_eq!(find_duplicate_id(&tasks).map(String::as_str), Some("a"));
        assert_eq!(find_duplicate_id(&tasks[..2]), None);
    }

    #[test]
    fn move_item_forward_and_backward() {
        let mut items = vec![0, 1, 2, 3, 4];
        move_item(&mut items, 1, 3);
        assert_eq!(items, vec![0, 2, 3, 1, 4]);

        move_item(&mut items, 4, 0);
        assert_eq!(items, vec![4, 0, 2, 3, 1]);

        move_item(&mut items, 2, 2);
        assert_eq!(items, vec![4, 0, 2, 3, 1]);
    }
}
