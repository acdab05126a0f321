//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, codec and controller.
//! - Provide id generation and list-level validation helpers.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` that is never reused.
//! - Position in the list is the only ordering; nothing re-sorts implicitly.

pub mod task;
