//! JSON codec for task snapshots and transfer files.
//!
//! Snapshots, exports and imports share one shape: an array of flat
//! `{id, text, completed}` records in list order. Unknown record fields are
//! ignored on read.

use crate::model::task::Task;

/// Serializes tasks in list order.
pub fn encode_tasks(tasks: &[Task]) -> serde_json::Result<String> {
    serde_json::to_string(tasks)
}

/// Parses an array of task records.
///
/// A leading UTF-8 byte-order mark is skipped, since exported files are
/// frequently re-saved by editors that add one.
pub fn decode_tasks(raw: &str) -> serde_json::Result<Vec<Task>> {
    serde_json::from_str(raw.trim_start_matches('\u{feff}'))
}
