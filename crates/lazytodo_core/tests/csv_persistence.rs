use chrono::NaiveDate;
use lazytodo_core::{CsvTaskRepository, Priority, RepoError, StoreError, TaskRepository, TaskStore};
use std::fs;

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn save_then_load_reproduces_tasks_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let mut store = TaskStore::new();
    store.add("Buy milk", date(2024, 3, 1), Priority::Medium).unwrap();
    store.add("Call Bob", None, Priority::High).unwrap();
    store
        .add("quote \"this\", and\nwrap", date(2023, 12, 31), Priority::Low)
        .unwrap();
    store.complete(2).unwrap();
    store.save(&path).unwrap();

    let mut loaded = TaskStore::new();
    loaded.load(&path).unwrap();
    assert_eq!(loaded, store);
}

#[test]
fn save_writes_four_field_rows_without_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let mut store = TaskStore::new();
    store.add("Buy milk", date(2024, 3, 1), Priority::Medium).unwrap();
    store.add("Call Bob", None, Priority::High).unwrap();
    store.complete(2).unwrap();
    store.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "Buy milk,2024-03-01,False,medium\nCall Bob,,True,high\n");
}

#[test]
fn load_missing_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TaskStore::new();
    store.add("stale", None, Priority::Low).unwrap();

    store.load(dir.path().join("absent.csv")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn load_accepts_files_written_by_the_legacy_tool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tareas.csv");
    fs::write(
        &path,
        "Comprar pan,,False,baja\r\n\"Llamar, a Ana\",2024-02-29,True,alta\r\n",
    )
    .unwrap();

    let mut store = TaskStore::new();
    store.load(&path).unwrap();

    assert_eq!(store.len(), 2);
    let first = store.get(1).unwrap();
    assert_eq!(first.description, "Comprar pan");
    assert_eq!(first.priority, Priority::Low);
    let second = store.get(2).unwrap();
    assert_eq!(second.description, "Llamar, a Ana");
    assert_eq!(second.due_date, date(2024, 2, 29));
    assert!(second.completed);
    assert_eq!(second.priority, Priority::High);
}

#[test]
fn load_rejects_unknown_priority_and_keeps_current_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");
    fs::write(&path, "ok,,False,low\nbad,,False,urgent\n").unwrap();

    let mut store = TaskStore::new();
    store.add("keep me", None, Priority::Low).unwrap();
    let before = store.clone();

    let err = store.load(&path).unwrap_err();
    assert!(err.is_invalid_priority());
    assert!(matches!(
        err,
        StoreError::Repo(RepoError::Validation { line: 2, .. })
    ));
    assert_eq!(store, before);
}

#[test]
fn load_rejects_malformed_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");
    fs::write(&path, "soon,next week,False,low\n").unwrap();

    let err = TaskStore::new().load(&path).unwrap_err();
    assert!(err.is_malformed_date());
}

#[test]
fn load_rejects_bad_shape_and_bad_boolean() {
    let repo_for = |contents: &str| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.csv");
        fs::write(&path, contents).unwrap();
        let result = CsvTaskRepository::new(&path).load_tasks();
        drop(dir);
        result
    };

    let err = repo_for("only,three,fields\n").unwrap_err();
    assert!(matches!(err, RepoError::InvalidRecord { line: 1, .. }));

    let err = repo_for("ok,,False,low\ntask,,maybe,low\n").unwrap_err();
    assert!(matches!(err, RepoError::InvalidRecord { line: 2, .. }));
}

#[test]
fn save_into_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("tasks.csv");

    let err = TaskStore::new().save(&path).unwrap_err();
    assert!(matches!(err, StoreError::Repo(RepoError::Io { .. })));
}

#[test]
fn save_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");
    fs::write(&path, "old,,False,low\nolder,,False,low\n").unwrap();

    let mut store = TaskStore::new();
    store.add("new", None, Priority::High).unwrap();
    store.save(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new,,False,high\n");
    let leftovers = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn scenario_round_trip_after_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let mut store = TaskStore::new();
    store.add("Buy milk", date(2024, 3, 1), Priority::Medium).unwrap();
    store.add("Call Bob", None, Priority::High).unwrap();
    store.sort_by_due_date();
    store.delete(1).unwrap();
    store.complete(1).unwrap();
    store.save(&path).unwrap();

    let mut loaded = TaskStore::new();
    loaded.load(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    let task = loaded.get(1).unwrap();
    assert_eq!(task.description, "Call Bob");
    assert_eq!(task.due_date, None);
    assert!(task.completed);
    assert_eq!(task.priority, Priority::High);
}

#[test]
fn descriptions_starting_with_byte_order_mark_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");

    let mut store = TaskStore::new();
    store.add("\u{feff}note", None, Priority::Low).unwrap();
    store.add("\u{feff}", None, Priority::High).unwrap();
    store.save(&path).unwrap();

    let mut loaded = TaskStore::new();
    loaded.load(&path).unwrap();
    assert_eq!(loaded, store);
}

#[cfg(unix)]
#[test]
fn save_keeps_existing_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.csv");
    fs::write(&path, "old,,False,low\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let mut store = TaskStore::new();
    store.add("new", None, Priority::Medium).unwrap();
    store.save(&path).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}
