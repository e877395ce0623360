use lifehub_core::model::finance::{FinancialTransaction, TransactionType};
use lifehub_core::model::note::Note;
use lifehub_core::model::pomodoro::{PomodoroSession, SessionType};
use lifehub_core::model::task::Task;
use lifehub_core::service::backup::{
    clear_all_patch, export_backup, import_writes, parse_backup, read_backup, write_backup,
    BackupError,
};
use lifehub_core::{
    open_db, Action, AppState, EntityKind, NullSink, Record, RecordRepository, RemoteSink,
    RemoteWrite, SqliteRecordRepository, Store, SyncWorker,
};
use serde_json::{json, Value};

fn seeded_store() -> Store<NullSink> {
    let mut store = Store::new(NullSink);
    store.dispatch(Action::Add(Record::Task(Task::with_id("t1", "Plan trip"))));
    store.dispatch(Action::Add(Record::Transaction(FinancialTransaction::new(
        TransactionType::Income,
        1200.0,
        "salary",
    ))));
    store
}

#[test]
fn export_uses_camel_case_keys_and_skips_session_fields() {
    let store = seeded_store();
    let json = export_backup(store.state()).unwrap();
    let document: Value = serde_json::from_str(&json).unwrap();
    let object = document.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "academicCourses",
            "availableThemes",
            "bibleReadings",
            "books",
            "currentTheme",
            "events",
            "financialTransactions",
            "goals",
            "journalEntries",
            "modules",
            "notes",
            "prayers",
            "projects",
            "tasks",
        ]
    );
    assert_eq!(document["tasks"][0]["title"], "Plan trip");
    assert_eq!(document["tasks"][0]["priority"], "medium");
    assert!(document["tasks"][0].get("createdAt").is_some());
    assert_eq!(document["financialTransactions"][0]["type"], "income");
    assert!(json.contains("\n  \"tasks\""));
}

#[test]
fn export_then_import_restores_collections() {
    let source = seeded_store();
    let json = export_backup(source.state()).unwrap();

    let mut target = Store::new(NullSink);
    target.dispatch(Action::LoadData(parse_backup(&json).unwrap()));

    assert_eq!(target.state().collections, source.state().collections);
    assert_eq!(target.state().current_theme, source.state().current_theme);
}

#[test]
fn partial_document_only_touches_present_keys() {
    let mut store = seeded_store();
    let patch = parse_backup(r#"{ "notes": [] , "unknownKey": 42 }"#).unwrap();
    assert!(patch.tasks.is_none());

    store.dispatch(Action::LoadData(patch));
    assert_eq!(store.state().collections.tasks.len(), 1);
}

#[test]
fn web_export_document_is_accepted() {
    let json = r#"{
        "tasks": [{
            "id": "1718000000000",
            "title": "Imported",
            "description": "",
            "completed": true,
            "priority": "high",
            "dueDate": "2024-06-20T00:00:00.000Z",
            "tags": ["home"],
            "createdAt": "2024-06-10T08:30:00.000Z",
            "updatedAt": "2024-06-11T08:30:00.000Z"
        }],
        "pomodoroSessions": [{
            "id": "p1",
            "duration": 25,
            "type": "longBreak",
            "startTime": "2024-06-10T08:00:00.000Z",
            "completed": true
        }]
    }"#;

    let patch = parse_backup(json).unwrap();
    let tasks = patch.tasks.unwrap();
    assert_eq!(tasks[0].title, "Imported");
    assert!(tasks[0].completed);
    let sessions: Vec<PomodoroSession> = patch.pomodoro_sessions.unwrap();
    assert_eq!(sessions[0].kind, SessionType::LongBreak);
}

#[test]
fn malformed_json_is_rejected_without_touching_state() {
    let mut store = seeded_store();
    let before = store.state().clone();

    let err = parse_backup("{ not json").unwrap_err();
    assert!(matches!(err, BackupError::InvalidJson(_)));
    assert!(err.to_string().contains("invalid JSON format"));

    let err = parse_backup(r#"{ "tasks": "nope" }"#).unwrap_err();
    assert!(matches!(err, BackupError::InvalidJson(_)));

    if let Ok(patch) = parse_backup("{ broken") {
        store.dispatch(Action::LoadData(patch));
    }
    assert_eq!(store.state(), &before);
}

#[test]
fn clear_all_empties_data_and_keeps_ui() {
    let mut store = seeded_store();
    store.dispatch(Action::ToggleModule("books".to_string()));
    let modules = store.state().modules.clone();

    store.dispatch(Action::LoadData(clear_all_patch()));

    assert_eq!(store.state().collections.total_len(), 0);
    assert_eq!(store.state().modules, modules);
}

#[test]
fn backup_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup.json");
    let store = seeded_store();

    write_backup(store.state(), &path).unwrap();
    let patch = read_backup(&path).unwrap();

    let mut state = AppState::default();
    patch.apply_to(&mut state);
    assert_eq!(state.collections, store.state().collections);

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        read_backup(&missing).unwrap_err(),
        BackupError::Io { .. }
    ));
}

#[test]
fn persisted_import_removes_records_missing_from_the_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifehub.sqlite3");
    let mut store = Store::new(SyncWorker::open(&path).unwrap());
    store.dispatch(Action::Add(Record::Task(Task::with_id("keep", "keep"))));
    store.dispatch(Action::Add(Record::Task(Task::with_id("gone", "gone"))));
    store.dispatch(Action::Add(Record::Note(Note::new("untouched", ""))));

    let document = json!({
        "tasks": [Task::with_id("keep", "keep, renamed"), Task::with_id("imported", "imported")]
    });
    let patch = parse_backup(&document.to_string()).unwrap();
    let replaced = patch.replaced_kinds();
    assert_eq!(replaced, vec![EntityKind::Task]);

    let before = store.state().collections.clone();
    store.dispatch(Action::LoadData(patch));
    let writes = import_writes(&before, &replaced, &store.state().collections);

    assert_eq!(writes.len(), 3);
    assert_eq!(
        writes[0],
        RemoteWrite::Delete {
            kind: EntityKind::Task,
            id: "gone".to_string(),
        }
    );
    assert!(matches!(&writes[1], RemoteWrite::Update(record) if record.id() == "keep"));
    assert!(matches!(&writes[2], RemoteWrite::Insert(record) if record.id() == "imported"));

    for write in writes {
        store.sink().submit(write);
    }
    store.sink().flush();
    assert_eq!(store.sink().stats().failed(), 0);

    let conn = open_db(&path).unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let mut ids: Vec<String> = repo
        .list(EntityKind::Task)
        .unwrap()
        .iter()
        .map(|record| record.id().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["imported", "keep"]);
    assert_eq!(repo.count(EntityKind::Note).unwrap(), 1);
}
