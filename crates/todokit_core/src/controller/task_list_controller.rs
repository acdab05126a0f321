//! Task list controller.
//!
//! # Responsibility
//! - Route discrete user intents to `TaskStore` mutations.
//! - Track edit, delete-confirmation and drag state for the current session.
//!
//! # Invariants
//! - Deletes only happen through `request_delete` + `confirm_delete`.
//! - Cancelling an edit re-applies the original text through `set_text`.
//! - Drag indices are derived from the live list at drop time.
//! - A failed store write keeps the interaction state that triggered it.

use super::interaction::{EditSession, InteractionState, ViewFilter};
use crate::model::task::Task;
use crate::storage::KeyValueStorage;
use crate::store::{StoreResult, TaskStore};
use crate::transfer::json::decode_tasks;
use crate::transfer::{ExportError, ExportFile, ImportError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Intent router over one task store.
pub struct TaskListController<S: KeyValueStorage> {
    store: TaskStore<S>,
    interaction: InteractionState,
}

impl<S: KeyValueStorage> TaskListController<S> {
    /// Creates a controller with fresh interaction state.
    pub fn new(store: TaskStore<S>) -> Self {
        Self {
            store,
            interaction: InteractionState::default(),
        }
    }

    /// Loads the default snapshot from `storage` and wraps it.
    pub fn load(storage: S) -> Self {
        Self::new(TaskStore::load(storage))
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.snapshot()
    }

    pub fn active_count(&self) -> usize {
        self.store.active_count()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn into_store(self) -> TaskStore<S> {
        self.store
    }

    /// Submits the add-task input.
    ///
    /// Returns `false` when the input was blank and dropped.
    pub fn submit(&mut self, raw: impl Into<String>) -> StoreResult<bool> {
        let before = self.store.len();
        let after = self.store.add(raw)?.len();
        Ok(after > before)
    }

    /// Flips completion of `id`; unknown ids are ignored.
    pub fn toggle_completed(&mut self, id: &str) -> StoreResult<&[Task]> {
        self.store.toggle_completed(id)
    }

    /// Enters inline edit mode for `id`, replacing any current session.
    ///
    /// Returns `false` for unknown ids.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        let Some(task) = self.store.get(id) else {
            return false;
        };
        self.interaction.editing = Some(EditSession {
            id: task.id.clone(),
            original_text: task.text.clone(),
        });
        true
    }

    /// Commits the edited text and leaves edit mode.
    pub fn commit_edit(&mut self, text: impl Into<String>) -> StoreResult<&[Task]> {
        let Some(session) = self.interaction.editing.take() else {
            return Ok(self.store.snapshot());
        };
        if let Err(err) = self.store.set_text(&session.id, text) {
            self.interaction.editing = Some(session);
            return Err(err);
        }
        Ok(self.store.snapshot())
    }

    /// Leaves edit mode by writing the original text back.
    pub fn cancel_edit(&mut self) -> StoreResult<&[Task]> {
        let Some(session) = self.interaction.editing.take() else {
            return Ok(self.store.snapshot());
        };
        if let Err(err) = self.store.set_text(&session.id, session.original_text.clone()) {
            self.interaction.editing = Some(session);
            return Err(err);
        }
        Ok(self.store.snapshot())
    }

    /// Marks `id` as awaiting delete confirmation.
    ///
    /// Only one delete can be pending; a new request replaces the old one.
    /// Returns `false` for unknown ids.
    pub fn request_delete(&mut self, id: &str) -> bool {
        if self.store.position(id).is_none() {
            return false;
        }
        self.interaction.pending_delete = Some(id.to_string());
        true
    }

    /// Deletes the pending task and clears the pending state.
    pub fn confirm_delete(&mut self) -> StoreResult<&[Task]> {
        let Some(id) = self.interaction.pending_delete.take() else {
            return Ok(self.store.snapshot());
        };
        if let Err(err) = self.store.remove(&id) {
            self.interaction.pending_delete = Some(id);
            return Err(err);
        }
        self.sync_interaction();
        Ok(self.store.snapshot())
    }

    /// Drops the pending delete without touching the list.
    pub fn cancel_delete(&mut self) {
        self.interaction.pending_delete = None;
    }

    /// Records the task being dragged. Returns `false` for unknown ids.
    pub fn drag_start(&mut self, id: &str) -> bool {
        if self.store.position(id).is_none() {
            return false;
        }
        self.interaction.dragging = Some(id.to_string());
        true
    }

    /// Abandons the active drag.
    pub fn drag_cancel(&mut self) {
        self.interaction.dragging = None;
    }

    /// Finishes a drag of `source` dropped over `destination`.
    ///
    /// Makes no store call when there is no destination, when it equals the
    /// source, or when either id is not in the current list.
    pub fn drag_end(&mut self, source: &str, destination: Option<&str>) -> StoreResult<&[Task]> {
        self.interaction.dragging = None;

        let Some(destination) = destination.filter(|destination| *destination != source) else {
            return Ok(self.store.snapshot());
        };
        let (Some(from), Some(to)) = (self.store.position(source), self.store.position(destination))
        else {
            warn!("event=task_drag_end module=controller status=skipped reason=unknown_id");
            return Ok(self.store.snapshot());
        };

        self.store.reorder(from, to)
    }

    /// Sets the non-destructive view filter.
    pub fn set_view_filter(&mut self, filter: ViewFilter) {
        self.interaction.view_filter = filter;
    }

    /// Tasks matching the current view filter, in list order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        let filter = self.interaction.view_filter;
        self.store
            .snapshot()
            .iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    /// Permanently drops every task not matching `filter`.
    pub fn retain_matching(&mut self, filter: ViewFilter) -> StoreResult<&[Task]> {
        let kept: Vec<Task> = self
            .store
            .snapshot()
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        self.replace_and_sync(kept)
    }

    /// Permanently removes completed tasks.
    pub fn clear_completed(&mut self) -> StoreResult<&[Task]> {
        self.retain_matching(ViewFilter::Active)
    }

    /// Permanently removes every task.
    pub fn clear_all(&mut self) -> StoreResult<&[Task]> {
        self.replace_and_sync(Vec::new())
    }

    /// Renders the current list as an export stamped with the current time.
    pub fn export(&self) -> Result<ExportFile, ExportError> {
        self.export_at(Utc::now())
    }

    pub fn export_at(&self, exported_at: DateTime<Utc>) -> Result<ExportFile, ExportError> {
        let file = ExportFile::render(self.store.snapshot(), exported_at)?;
        info!(
            "event=task_export module=controller status=ok count={}",
            self.store.len()
        );
        Ok(file)
    }

    /// Writes the current list into `dir` and returns the file path.
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        self.export()?.write_to_dir(dir)
    }

    /// Replaces the list with the tasks parsed from `raw`.
    ///
    /// # Errors
    /// - `ImportError::Parse` when `raw` is not an array of task records.
    /// - `ImportError::Store` when the list is rejected or cannot be saved.
    ///
    /// The canonical list is unchanged on every error.
    pub fn import_json(&mut self, raw: &str) -> Result<&[Task], ImportError> {
        let tasks = match decode_tasks(raw) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=task_import module=controller status=error error_code=parse_failed error={err}"
                );
                return Err(ImportError::Parse(err));
            }
        };
        let count = tasks.len();
        self.replace_and_sync(tasks)?;
        info!("event=task_import module=controller status=ok count={count}");
        Ok(self.store.snapshot())
    }

    /// Reads a UTF-8 file and imports it.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<&[Task], ImportError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "event=task_import module=controller status=error error_code=read_failed error={err}"
                );
                return Err(ImportError::Read(err));
            }
        };
        self.import_json(&raw)
    }

    fn replace_and_sync(&mut self, tasks: Vec<Task>) -> StoreResult<&[Task]> {
        self.store.replace_all(tasks)?;
        self.sync_interaction();
        Ok(self.store.snapshot())
    }

    fn sync_interaction(&mut self) {
        self.interaction.retain_known(self.store.snapshot());
    }
}
