use chrono::NaiveDate;
use lazytodo_core::{ListFilter, Priority, StoreError, TaskStore};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn sample_store() -> TaskStore {
    let mut store = TaskStore::new();
    store.add("undated a", None, Priority::Low).unwrap();
    store.add("late", date(2024, 5, 1), Priority::Medium).unwrap();
    store.add("undated b", None, Priority::High).unwrap();
    store.add("early", date(2024, 1, 15), Priority::Medium).unwrap();
    store.add("late twin", date(2024, 5, 1), Priority::Low).unwrap();
    store
}

fn descriptions(store: &TaskStore) -> Vec<&str> {
    store
        .tasks()
        .iter()
        .map(|task| task.description.as_str())
        .collect()
}

#[test]
fn add_appends_and_returns_position() {
    let mut store = TaskStore::new();
    assert_eq!(store.add("one", None, Priority::Low).unwrap(), 1);
    assert_eq!(store.add("two", None, Priority::Low).unwrap(), 2);
    assert_eq!(descriptions(&store), ["one", "two"]);
}

#[test]
fn add_rejects_empty_description_without_mutation() {
    let mut store = sample_store();
    let err = store.add("", None, Priority::Low).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.len(), 5);
}

#[test]
fn complete_touches_only_the_addressed_task() {
    let mut store = sample_store();
    let before = store.clone();

    store.complete(3).unwrap();
    for (slot, task) in store.tasks().iter().enumerate() {
        if slot == 2 {
            assert!(task.completed);
        } else {
            assert_eq!(task, &before.tasks()[slot]);
        }
    }

    let after_first = store.clone();
    store.complete(3).unwrap();
    assert_eq!(store, after_first);
}

#[test]
fn out_of_range_indices_fail_without_mutation() {
    let mut store = sample_store();
    let before = store.clone();

    for index in [0, 6, 100] {
        assert!(store.complete(index).unwrap_err().is_invalid_index());
        assert!(store.delete(index).unwrap_err().is_invalid_index());
        assert!(store.edit(index, "x", None).unwrap_err().is_invalid_index());
        assert!(store
            .set_priority(index, "high")
            .unwrap_err()
            .is_invalid_index());
    }
    assert_eq!(store, before);
}

#[test]
fn empty_store_rejects_index_one() {
    let mut store = TaskStore::new();
    let err = store.complete(1).unwrap_err();
    assert!(matches!(err, StoreError::InvalidIndex { index: 1, len: 0 }));
}

#[test]
fn delete_shifts_later_positions_down() {
    let mut store = sample_store();
    let removed = store.delete(2).unwrap();

    assert_eq!(removed.description, "late");
    assert_eq!(
        descriptions(&store),
        ["undated a", "undated b", "early", "late twin"]
    );
    assert_eq!(store.get(2).unwrap().description, "undated b");
}

#[test]
fn edit_replaces_text_and_date_but_keeps_status_and_priority() {
    let mut store = sample_store();
    store.complete(2).unwrap();

    store.edit(2, "rescheduled", date(2024, 6, 1)).unwrap();
    let task = store.get(2).unwrap();
    assert_eq!(task.description, "rescheduled");
    assert_eq!(task.due_date, date(2024, 6, 1));
    assert!(task.completed);
    assert_eq!(task.priority, Priority::Medium);

    let err = store.edit(2, "  ", None).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.get(2).unwrap().description, "rescheduled");
}

#[test]
fn set_priority_rejects_unknown_label_and_keeps_old_value() {
    let mut store = sample_store();

    let err = store.set_priority(1, "invalid-label").unwrap_err();
    assert!(err.is_invalid_priority());
    assert_eq!(store.get(1).unwrap().priority, Priority::Low);

    store.set_priority(1, "HIGH").unwrap();
    assert_eq!(store.get(1).unwrap().priority, Priority::High);
}

#[test]
fn list_filters_and_reports_store_positions() {
    let mut store = sample_store();
    store.complete(2).unwrap();
    store.complete(4).unwrap();

    let completed: Vec<usize> = store
        .list(ListFilter::Completed)
        .map(|(position, _)| position)
        .collect();
    assert_eq!(completed, [2, 4]);

    let pending: Vec<usize> = store
        .list(ListFilter::Pending)
        .map(|(position, _)| position)
        .collect();
    assert_eq!(pending, [1, 3, 5]);

    assert_eq!(store.list(ListFilter::All).count(), 5);
}

#[test]
fn list_filter_parses_known_labels() {
    assert_eq!("Pending".parse::<ListFilter>().unwrap(), ListFilter::Pending);
    assert_eq!("completadas".parse::<ListFilter>().unwrap(), ListFilter::Completed);
    assert_eq!("".parse::<ListFilter>().unwrap(), ListFilter::All);
    assert!("someday".parse::<ListFilter>().is_err());
}

#[test]
fn sort_puts_dated_first_ascending_and_keeps_undated_order() {
    let mut store = sample_store();
    store.sort_by_due_date();

    assert_eq!(
        descriptions(&store),
        ["early", "late", "late twin", "undated a", "undated b"]
    );
}

#[test]
fn sort_is_idempotent() {
    let mut store = sample_store();
    store.sort_by_due_date();
    let once = store.clone();
    store.sort_by_due_date();
    assert_eq!(store, once);
}

#[test]
fn scenario_sort_delete_complete() {
    let mut store = TaskStore::new();
    store.add("Buy milk", date(2024, 3, 1), Priority::Medium).unwrap();
    store.add("Call Bob", None, Priority::High).unwrap();

    store.sort_by_due_date();
    assert_eq!(descriptions(&store), ["Buy milk", "Call Bob"]);

    store.delete(1).unwrap();
    assert_eq!(descriptions(&store), ["Call Bob"]);

    store.complete(1).unwrap();
    let task = store.get(1).unwrap();
    assert!(task.completed);
    assert_eq!(task.due_date, None);
    assert_eq!(task.priority, Priority::High);
}

#[test]
fn completion_survives_every_other_store_operation() {
    let mut store = sample_store();
    store.complete(2).unwrap();

    store.edit(2, "late, edited", date(2024, 7, 1)).unwrap();
    store.set_priority(2, "high").unwrap();
    store.complete(2).unwrap();
    store.sort_by_due_date();

    let completed: Vec<&str> = store
        .list(ListFilter::Completed)
        .map(|(_, task)| task.description.as_str())
        .collect();
    assert_eq!(completed, ["late, edited"]);
}
