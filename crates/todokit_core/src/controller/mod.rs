//! User-intent orchestration over the task store.
//!
//! # Responsibility
//! - Translate add/edit/delete/drag/bulk/import/export intents into store
//!   calls.
//! - Hold per-session interaction state outside the persisted model.
//!
//! # Invariants
//! - Interaction state is never written to storage.
//! - Interaction state never references ids missing from the current list.

pub mod interaction;
pub mod task_list_controller;

pub use interaction::{EditSession, InteractionState, ViewFilter};
pub use task_list_controller::TaskListController;
