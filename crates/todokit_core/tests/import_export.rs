use chrono::{TimeZone, Utc};
use todokit_core::{ImportError, MemoryStorage, StoreError, Task, TaskListController, TaskStore};

fn seeded(storage: &MemoryStorage) -> TaskListController<&MemoryStorage> {
    let mut controller = TaskListController::load(storage);
    controller.submit("buy milk").unwrap();
    controller.submit("walk dog").unwrap();
    let first = controller.tasks()[0].id.clone();
    controller.toggle_completed(&first).unwrap();
    controller
}

#[test]
fn export_then_import_restores_the_same_list() {
    let storage = MemoryStorage::new();
    let mut controller = seeded(&storage);
    let exported_list = controller.tasks().to_vec();
    let file = controller.export().unwrap();

    controller.clear_all().unwrap();
    let list = controller.import_json(&file.contents).unwrap();
    assert_eq!(list, exported_list.as_slice());

    let reloaded = TaskStore::load(&storage);
    assert_eq!(reloaded.snapshot(), exported_list.as_slice());
}

#[test]
fn export_file_is_named_after_timestamp() {
    let storage = MemoryStorage::new();
    let controller = seeded(&storage);
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();

    let file = controller.export_at(at).unwrap();
    assert_eq!(file.file_name, "todos-2026-10-18T12:00:00.000Z.json");

    let records: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
    assert_eq!(records[0]["text"], "buy milk");
    assert_eq!(records[0]["completed"], true);
    assert_eq!(records[1]["text"], "walk dog");
    assert_eq!(records[1]["completed"], false);
}

#[test]
fn export_to_dir_and_import_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new();
    let controller = seeded(&storage);
    let expected = controller.tasks().to_vec();

    let path = controller.export_to_dir(dir.path()).unwrap();
    assert!(path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("todos-") && name.ends_with(".json")));

    let other_storage = MemoryStorage::new();
    let mut other = TaskListController::load(&other_storage);
    let list = other.import_file(&path).unwrap();
    assert_eq!(list, expected.as_slice());
}

#[test]
fn import_replaces_instead_of_merging() {
    let storage = MemoryStorage::new();
    let mut controller = seeded(&storage);

    let raw = r#"[{"id":"1700000000000","text":"from file","completed":false}]"#;
    let list = controller.import_json(raw).unwrap();
    assert_eq!(list, &[Task::with_id("1700000000000", "from file")]);
}

#[test]
fn import_accepts_records_from_the_legacy_content_field() {
    let storage = MemoryStorage::new();
    let mut controller = TaskListController::load(&storage);

    let raw = r#"[{"id":"1","content":"old export","completed":true}]"#;
    let list = controller.import_json(raw).unwrap();
    assert_eq!(list[0].text, "old export");
    assert!(list[0].completed);
}

#[test]
fn unparsable_import_leaves_list_untouched() {
    let storage = MemoryStorage::new();
    let mut controller = seeded(&storage);
    let before = controller.tasks().to_vec();

    for raw in ["{oops", "42", r#"{"id":"1","text":"x"}"#, r#"[{"text":"no id"}]"#] {
        let err = controller.import_json(raw).unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)), "payload {raw}");
        assert_eq!(err.user_message(), "The file format is invalid.");
        assert_eq!(controller.tasks(), before.as_slice());
    }
}

#[test]
fn import_with_duplicate_ids_is_rejected() {
    let storage = MemoryStorage::new();
    let mut controller = seeded(&storage);
    let before = controller.tasks().to_vec();

    let raw = r#"[
        {"id":"a","text":"one","completed":false},
        {"id":"a","text":"two","completed":false}
    ]"#;
    let err = controller.import_json(raw).unwrap_err();
    assert!(matches!(err, ImportError::Store(StoreError::DuplicateId(_))));
    assert_eq!(err.user_message(), "The file contains duplicate task ids.");
    assert_eq!(controller.tasks(), before.as_slice());
}

#[test]
fn missing_import_file_reports_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage = MemoryStorage::new();
    let mut controller = seeded(&storage);

    let err = controller
        .import_file(dir.path().join("absent.json"))
        .unwrap_err();
    assert!(matches!(err, ImportError::Read(_)));
    assert_eq!(controller.tasks().len(), 2);
}

#[test]
fn import_overwrites_edits_made_before_it_lands() {
    let storage = MemoryStorage::new();
    let mut controller = seeded(&storage);
    let file = controller.export().unwrap();

    controller.submit("added while reading").unwrap();
    let list = controller.import_json(&file.contents).unwrap();

    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|task| task.text != "added while reading"));
}

#[test]
fn import_clears_interaction_state_for_vanished_tasks() {
    let storage = MemoryStorage::new();
    let mut controller = seeded(&storage);
    let first = controller.tasks()[0].id.clone();

    controller.begin_edit(&first);
    controller.request_delete(&first);
    controller
        .import_json(r#"[{"id":"new","text":"fresh","completed":false}]"#)
        .unwrap();

    assert!(controller.interaction().editing().is_none());
    assert_eq!(controller.interaction().pending_delete(), None);
}
