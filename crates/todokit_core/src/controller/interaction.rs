//! Ephemeral interaction state for one session.

use crate::model::task::{Task, TaskId};

/// Non-destructive view filter for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewFilter {
    #[default]
    All,
    /// Incomplete tasks only.
    Active,
    /// Completed tasks only.
    Completed,
}

impl ViewFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Task currently being edited inline, with the text it had on entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: TaskId,
    pub original_text: String,
}

/// Interaction state lost on reload: edit session, pending delete, active
/// drag and view filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub(crate) editing: Option<EditSession>,
    pub(crate) pending_delete: Option<TaskId>,
    pub(crate) dragging: Option<TaskId>,
    pub(crate) view_filter: ViewFilter,
}

impl InteractionState {
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn view_filter(&self) -> ViewFilter {
        self.view_filter
    }

    /// Drops references to ids that are no longer in `tasks`.
    pub(crate) fn retain_known(&mut self, tasks: &[Task]) {
        let known = |id: &str| tasks.iter().any(|task| task.id == id);

        if self
            .editing
            .as_ref()
            .is_some_and(|session| !known(session.id.as_str()))
        {
            self.editing = None;
        }
        if self.pending_delete.as_deref().is_some_and(|id| !known(id)) {
            self.pending_delete = None;
        }
        if self.dragging.as_deref().is_some_and(|id| !known(id)) {
            self.dragging = None;
        }
    }
}
