mod common;

use chrono::{NaiveDate, TimeZone, Utc};
use common::ScriptedBackend;
use flowdesk_core::service::{TASKS_STORAGE_KEY, TODOS_STORAGE_KEY};
use flowdesk_core::{
    BackupDocument, BackupError, BoardColumn, DurableStore, EventLoop, ImportSummary,
    MemoryBackend, Workspace,
};
use serde_json::{json, Value};
use std::rc::Rc;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn hydrated_workspace(store: Rc<DurableStore>) -> (EventLoop, Workspace) {
    let event_loop = EventLoop::new();
    let workspace = Workspace::open(&event_loop, store, day()).unwrap();
    event_loop.run_until_idle();
    (event_loop, workspace)
}

#[test]
fn export_contains_all_collections_and_timestamp() {
    let (_loop, workspace) = hydrated_workspace(Rc::new(DurableStore::new(MemoryBackend::new())));
    let exported_at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();

    let json = workspace.export_json(exported_at).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["exportedAt"], "2026-10-18T09:30:00.000Z");
    assert_eq!(value["tasks"].as_array().unwrap().len(), 4);
    assert_eq!(value["tasks"][0]["status"], "progress");
    assert_eq!(value["todos"][1]["completed"], true);
    assert_eq!(value["events"][0]["time"], "09:30");
    assert!(json.contains("\n  \"tasks\""), "export should be pretty-printed");
}

#[test]
fn export_then_import_restores_another_workspace() {
    let (_source_loop, source) =
        hydrated_workspace(Rc::new(DurableStore::new(MemoryBackend::new())));
    source.move_task("task-3", BoardColumn::Review);
    source.remove_todo("todo-1");
    let json = source.export_json(Utc::now()).unwrap();

    let target_backend = MemoryBackend::new();
    let (_target_loop, target) =
        hydrated_workspace(Rc::new(DurableStore::new(target_backend.clone())));
    target.reset_to_defaults();
    let summary = target.import_json(&json).unwrap();

    assert_eq!(
        summary,
        ImportSummary {
            tasks: Some(4),
            todos: Some(1),
            events: Some(2),
        }
    );
    assert_eq!(target.tasks().get(), source.tasks().get());
    assert_eq!(target.todos().get(), source.todos().get());
    assert_eq!(target.events().get(), source.events().get());
    assert!(target_backend
        .raw(TASKS_STORAGE_KEY)
        .unwrap()
        .starts_with(r#"[{"id":"task-3""#));
}

#[test]
fn import_replaces_only_present_keys() {
    let (_loop, workspace) = hydrated_workspace(Rc::new(DurableStore::new(MemoryBackend::new())));
    let document = json!({
        "todos": [{ "id": "t1", "title": "Only todo", "completed": false }],
        "events": null,
        "exportedAt": "whenever"
    });

    let summary = workspace.import_json(&document.to_string()).unwrap();

    assert_eq!(summary.tasks, None);
    assert_eq!(summary.todos, Some(1));
    assert_eq!(summary.events, None);
    assert_eq!(workspace.tasks().get().len(), 4);
    assert_eq!(workspace.todos().get()[0].title, "Only todo");
    assert_eq!(workspace.events().get().len(), 2);
}

#[test]
fn malformed_document_leaves_state_and_storage_untouched() {
    let backend = ScriptedBackend::new();
    let (_loop, workspace) = hydrated_workspace(Rc::new(DurableStore::new(backend.clone())));
    let before = workspace.todos().get();

    let err = workspace.import_json("{\"todos\": [").unwrap_err();

    assert!(matches!(err, BackupError::Parse(_)));
    assert!(err.to_string().contains("check the format"));
    assert_eq!(workspace.todos().get(), before);
    assert!(backend.write_attempts(TODOS_STORAGE_KEY).is_empty());
}

#[test]
fn one_invalid_record_rejects_the_whole_import() {
    let backend = ScriptedBackend::new();
    let (_loop, workspace) = hydrated_workspace(Rc::new(DurableStore::new(backend.clone())));
    let document = json!({
        "tasks": [{ "id": "ok", "title": "Fine", "status": "todo", "priority": "low" }],
        "events": [{ "id": "e1", "title": "Broken", "date": "2026-10-18", "time": "25:00" }]
    });

    let err = workspace.import_json(&document.to_string()).unwrap_err();

    assert!(matches!(
        err,
        BackupError::InvalidRecord { collection: "events", index: 0, .. }
    ));
    assert_eq!(workspace.tasks().get().len(), 4);
    assert!(backend.write_attempts(TASKS_STORAGE_KEY).is_empty());
}

#[test]
fn unknown_group_ids_survive_import() {
    let (_loop, workspace) = hydrated_workspace(Rc::new(DurableStore::new(MemoryBackend::new())));
    let document = BackupDocument::parse(
        r#"{"tasks": [{"id": "x", "title": "Legacy", "status": "icebox", "priority": "high"}]}"#,
    )
    .unwrap();

    workspace.apply_document(document);

    let tasks = workspace.tasks().get();
    assert_eq!(tasks[0].group_id, "icebox");
    assert_eq!(tasks[0].column(), None);
}
