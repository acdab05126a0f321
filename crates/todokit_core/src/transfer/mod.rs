//! Import/export of task lists as flat JSON files.
//!
//! # Responsibility
//! - Name and render export files from a list snapshot.
//! - Classify import failures into user-facing messages.
//!
//! # Invariants
//! - Export and import use the persistence record shape unchanged.
//! - A failed import never reaches the store.

pub mod json;

use crate::model::task::Task;
use crate::store::StoreError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const EXPORT_FILE_PREFIX: &str = "todos-";
const EXPORT_FILE_EXTENSION: &str = "json";

/// Rendered export ready to be offered as a download or written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl ExportFile {
    /// Renders `tasks` into an export named after `exported_at`.
    pub fn render(tasks: &[Task], exported_at: DateTime<Utc>) -> Result<Self, ExportError> {
        let contents = json::encode_tasks(tasks).map_err(StoreError::Encode)?;
        Ok(Self {
            file_name: export_file_name(exported_at),
            contents,
        })
    }

    /// Writes the export into `dir` and returns the written path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, self.contents.as_bytes()).map_err(ExportError::Write)?;
        Ok(path)
    }
}

/// Returns `todos-<ISO8601>.json` with millisecond precision in UTC.
pub fn export_file_name(exported_at: DateTime<Utc>) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}{}.{EXPORT_FILE_EXTENSION}",
        exported_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Errors from export flows.
#[derive(Debug)]
pub enum ExportError {
    Store(StoreError),
    Write(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Write(err) => write!(f, "failed to write export file: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Write(err) => Some(err),
        }
    }
}

impl From<StoreError> for ExportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Errors from import flows. None of them modify the canonical list.
#[derive(Debug)]
pub enum ImportError {
    /// The file could not be read as UTF-8 text.
    Read(std::io::Error),
    /// The content is not an array of task records.
    Parse(serde_json::Error),
    /// The parsed list was rejected or could not be persisted.
    Store(StoreError),
}

impl ImportError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Read(_) => "The file could not be read.",
            Self::Parse(_) => "The file format is invalid.",
            Self::Store(StoreError::DuplicateId(_)) => "The file contains duplicate task ids.",
            Self::Store(_) => "The imported tasks could not be saved.",
        }
    }
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to read import file: {err}"),
            Self::Parse(err) => write!(f, "invalid import file: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ImportError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{export_file_name, ExportFile};
    use crate::model::task::Task;
    use chrono::{TimeZone, Utc};

    #[test]
    fn export_file_name_uses_iso_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 5).unwrap();
        assert_eq!(export_file_name(at), "todos-2026-10-18T09:30:05.000Z.json");
    }

    #[test]
    fn render_encodes_snapshot() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let file = ExportFile::render(&[Task::with_id("x", "buy milk")], at).unwrap();
        assert_eq!(
            file.contents,
            r#"[{"id":"x","text":"buy milk","completed":false}]"#
        );
        assert!(file.file_name.starts_with("todos-2026-01-02T03:04:05"));
    }
}
