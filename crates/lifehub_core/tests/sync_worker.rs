use lifehub_core::model::note::Note;
use lifehub_core::model::task::Task;
use lifehub_core::store::sync::apply_write;
use lifehub_core::{
    open_db, open_db_in_memory, Action, EntityKind, Record, RecordRepository, RemoteSink,
    RemoteWrite, RepoError, SqliteRecordRepository, Store, SyncError, SyncWorker,
};
use rusqlite::Connection;

#[test]
fn dispatched_writes_reach_storage_after_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifehub.sqlite3");

    let mut store = Store::new(SyncWorker::open(&path).unwrap());
    let task = Task::with_id("t1", "call bank");
    store.dispatch(Action::Add(Record::Task(task.clone())));
    store.dispatch(Action::Update(Record::Task(task.toggled(chrono::Utc::now()))));
    store.dispatch(Action::Add(Record::Note(Note::new("scratch", ""))));
    store.sink().flush();

    assert_eq!(store.sink().stats().applied(), 3);
    assert_eq!(store.sink().stats().failed(), 0);

    let conn = open_db(&path).unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    match repo.get(EntityKind::Task, "t1").unwrap() {
        Some(Record::Task(stored)) => assert!(stored.completed),
        other => panic!("unexpected record: {other:?}"),
    }
    assert_eq!(repo.count(EntityKind::Note).unwrap(), 1);
}

#[test]
fn failed_writes_are_counted_and_local_state_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifehub.sqlite3");

    let mut store = Store::new(SyncWorker::open(&path).unwrap());
    let ghost = Task::with_id("ghost", "never inserted");
    store.dispatch(Action::Update(Record::Task(ghost)));
    let twin = Task::with_id("twin", "same id twice");
    store.dispatch(Action::Add(Record::Task(twin.clone())));
    store.dispatch(Action::Add(Record::Task(twin)));
    store.sink().flush();

    assert_eq!(store.sink().stats().applied(), 1);
    assert_eq!(store.sink().stats().failed(), 2);
    assert_eq!(store.state().collections.tasks.len(), 2);
}

#[test]
fn dropping_worker_drains_pending_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifehub.sqlite3");

    {
        let worker = SyncWorker::open(&path).unwrap();
        for i in 0..25 {
            worker.submit(RemoteWrite::Insert(Record::Task(Task::with_id(
                format!("t{i}"),
                "bulk",
            ))));
        }
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count(EntityKind::Task).unwrap(), 25);
}

#[test]
fn hydrate_after_restart_restores_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifehub.sqlite3");

    {
        let mut store = Store::new(SyncWorker::open(&path).unwrap());
        store.dispatch(Action::Add(Record::Task(Task::with_id("keep", "survives"))));
        store.dispatch(Action::Add(Record::Task(Task::with_id("drop", "removed"))));
        store.dispatch(Action::delete(EntityKind::Task, "drop"));
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let mut store = Store::new(SyncWorker::open(&path).unwrap());
    store.hydrate(&repo).unwrap();

    let ids: Vec<&str> = store
        .state()
        .collections
        .tasks
        .iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids, vec!["keep"]);
}

#[test]
fn spawn_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SyncWorker::spawn(conn),
        Err(SyncError::Repo(RepoError::UninitializedConnection { .. }))
    ));
}

#[test]
fn apply_write_maps_each_operation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let note = Note::new("n", "body");
    let id = note.id.clone();

    apply_write(&repo, &RemoteWrite::Insert(Record::Note(note.clone()))).unwrap();
    let mut edited = note;
    edited.content = "edited".to_string();
    apply_write(&repo, &RemoteWrite::Update(Record::Note(edited.clone()))).unwrap();
    assert_eq!(
        repo.get(EntityKind::Note, &id).unwrap(),
        Some(Record::Note(edited))
    );

    apply_write(
        &repo,
        &RemoteWrite::Delete {
            kind: EntityKind::Note,
            id: id.clone(),
        },
    )
    .unwrap();
    assert_eq!(repo.get(EntityKind::Note, &id).unwrap(), None);
}
