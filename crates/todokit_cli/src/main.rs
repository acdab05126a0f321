//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todokit_core` linkage without any UI shell.
//! - Start file logging, then print the task summary stored in an optional
//!   SQLite database path.
//!
//! Usage: `todokit [db_path] [log_dir]`. Without `log_dir`, logs go to
//! `logs/` next to the database, or under the temp dir for in-memory runs.

use std::path::{Path, PathBuf};
use todokit_core::{default_log_level, init_logging, SqliteStorage, TaskStore};

fn main() {
    let mut args = std::env::args().skip(1);
    let db_path = args.next();
    let log_dir = args.next();

    let log_dir = resolve_log_dir(db_path.as_deref(), log_dir.as_deref());
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("todokit logging unavailable: {err}");
    }

    println!("todokit_core ping={}", todokit_core::ping());
    println!("todokit_core version={}", todokit_core::core_version());

    let storage = match db_path {
        Some(path) => SqliteStorage::open(path),
        None => SqliteStorage::open_in_memory(),
    };
    let storage = match storage {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("todokit storage open failed: {err}");
            std::process::exit(1);
        }
    };

    let store = TaskStore::load(storage);
    println!(
        "todokit_core tasks={} active={}",
        store.len(),
        store.active_count()
    );
    log::logger().flush();
}

/// Picks the log directory: explicit argument, then `<db dir>/logs`, then
/// the temp dir. The result is always absolute.
fn resolve_log_dir(db_path: Option<&str>, explicit: Option<&str>) -> PathBuf {
    if let Some(dir) = explicit.map(str::trim).filter(|dir| !dir.is_empty()) {
        return absolute(Path::new(dir));
    }
    match db_path {
        Some(db_path) => {
            let parent = Path::new(db_path)
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            absolute(parent).join("logs")
        }
        None => std::env::temp_dir().join("todokit").join("logs"),
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => std::env::temp_dir().join(path),
    }
}
