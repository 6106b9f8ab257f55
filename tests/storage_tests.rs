//! File store and end-to-end run tests
mod common;

use common::*;
use git2::Repository;
use std::fs;
use task_automator::{
    Automator, Config, FileStore, ItemStore, ItemUpdate, Priority, RunPlan, StoreError,
};

#[test]
fn test_changes_persist_only_after_commit() {
    let (mut store, dir) = open_store(vec![inbox()], vec![item("a", "Task", "inbox", None, 1)]);
    let path = dir.path().join("tasks.toml");

    store
        .update_item("a", ItemUpdate::content("Renamed"))
        .unwrap();
    store.create_item("New task", None, None).unwrap();

    let on_disk = FileStore::open(&path).unwrap();
    assert_eq!(get(&on_disk, "a").content, "Task");
    assert_eq!(on_disk.list_all_items().len(), 1);

    store.commit().unwrap();
    assert_eq!(store.pending_changes(), 0);

    let reloaded = FileStore::open(&path).unwrap();
    assert_eq!(get(&reloaded, "a").content, "Renamed");
    assert_eq!(reloaded.list_all_items().len(), 2);
}

#[test]
fn test_create_item_placement() {
    let (mut store, _dir) = open_store(
        vec![inbox(), project("p", "Work")],
        vec![
            item("parent", "Parent", "p", None, 1),
            item("kid", "Kid", "p", Some("parent"), 5),
            item("top", "Inbox task", "inbox", None, 3),
        ],
    );

    let child = store.create_item("Second kid", Some("parent"), None).unwrap();
    assert_eq!(child.project_id, "p");
    assert_eq!(child.child_order, 6);

    let root = store.create_item("Captured", None, None).unwrap();
    assert_eq!(root.project_id, "inbox");
    assert_eq!(root.child_order, 4);
    assert!(root.parent_id.is_none());

    let result = store.create_item("Lost", Some("missing"), None);
    assert!(matches!(result, Err(StoreError::ItemNotFound(_))));
}

#[test]
fn test_inbox_found_by_configured_name() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tasks.toml");
    let data = task_automator::ItemData::from_parts(vec![project("cap", "Capture")], vec![]);
    FileStore::save(&path, &data).unwrap();

    let mut store = FileStore::open(&path).unwrap().with_inbox_name("Capture");
    let created = store.create_item("Idea", None, None).unwrap();
    assert_eq!(created.project_id, "cap");
}

#[test]
fn test_update_and_close_unknown_item() {
    let (mut store, _dir) = open_store(vec![inbox()], vec![]);
    assert!(matches!(
        store.update_item("ghost", ItemUpdate::priority(Priority(2))),
        Err(StoreError::ItemNotFound(_))
    ));
    assert!(matches!(
        store.close_item("ghost", today()),
        Err(StoreError::ItemNotFound(_))
    ));
}

#[test]
fn test_close_advances_weekday_recurrence() {
    let (mut store, _dir) = open_store(
        vec![project("p", "Work")],
        vec![due(
            item("standup", "Standup notes", "p", None, 1),
            days_from_today(-3),
            "every workday",
        )],
    );

    store.close_item("standup", today()).unwrap();
    let standup = get(&store, "standup");
    assert!(!standup.checked);
    // today() is a Monday, so the next workday is Tuesday
    assert_eq!(standup.due_date(), Some(days_from_today(1)));
}

#[test]
fn test_malformed_data_file_is_parse_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tasks.toml");
    fs::write(&path, "[[items]]\nchecked = \"yes\"\n").unwrap();

    assert!(matches!(FileStore::open(&path), Err(StoreError::Parse(_))));
}

#[test]
fn test_full_run_then_commit() {
    let (store, dir) = open_store(
        vec![
            inbox(),
            project("cl", "Start-of-Day Checklist"),
            project("habits", "HABITS"),
        ],
        vec![
            item("step", "Make coffee", "cl", None, 1),
            due(
                item("water", "[3] Drink water", "habits", None, 1),
                days_from_today(1),
                "every day",
            ),
        ],
    );
    let mut automator = Automator::new(store, Config::default());

    let plan = RunPlan {
        checklists: vec!["start-of-day".to_string()],
        update_habits: true,
        frequent_hygiene: true,
        rare_hygiene: true,
    };
    let summary = automator.run(&plan, at_hour(today(), 23)).unwrap();
    assert_eq!(summary.len(), 4);
    assert!(summary[0].contains("Start-of-Day Checklist"));
    assert!(summary[1].contains("1 incremented"));

    assert_eq!(automator.commit().unwrap(), 2);

    let reloaded = FileStore::open(dir.path().join("tasks.toml")).unwrap();
    assert_eq!(get(&reloaded, "water").content, "[4] Drink water");
    assert_eq!(inbox_items(&reloaded)[0].content, "Make coffee");
}

#[test]
fn test_commit_records_git_history() {
    let dir = tempfile::TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    let path = dir.path().join("tasks.toml");
    let data = task_automator::ItemData::from_parts(vec![inbox()], vec![]);
    FileStore::save(&path, &data).unwrap();

    let mut store = FileStore::open(&path).unwrap().with_git_sync(true);
    store.create_item("Tracked", None, None).unwrap();
    store.commit().unwrap();

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert!(head.message().unwrap().starts_with("Automation run: 1 change(s)"));
}

#[test]
fn test_commit_failure_keeps_changes_pending() {
    let (mut store, dir) = open_store(vec![inbox()], vec![item("a", "Task", "inbox", None, 1)]);
    store
        .update_item("a", ItemUpdate::content("Renamed"))
        .unwrap();

    fs::remove_dir_all(dir.path()).unwrap();

    assert!(matches!(store.commit(), Err(StoreError::Io(_))));
    assert_eq!(store.pending_changes(), 1);
}

#[test]
fn test_automator_commit_failure_is_propagated() {
    let (store, dir) = open_store(vec![inbox()], vec![item("a", "Task", "inbox", None, 1)]);
    let mut automator = Automator::new(store, Config::default());
    automator.copy_project_contents_to_inbox("Inbox").unwrap();
    let pending = automator.store().pending_changes();
    assert!(pending > 0);

    fs::remove_dir_all(dir.path()).unwrap();

    assert!(automator.finish(false).is_err());
    assert_eq!(automator.store().pending_changes(), pending);
}

#[test]
fn test_dry_run_reports_without_writing() {
    let (store, dir) = open_store(
        vec![inbox(), project("cl", "End-of-Day Checklist")],
        vec![item("step", "Plan tomorrow", "cl", None, 1)],
    );
    let path = dir.path().join("tasks.toml");
    let mut automator = Automator::new(store, Config::default());
    automator.copy_checklist("end-of-day").unwrap();

    let line = automator.finish(true).unwrap();
    assert_eq!(line, "Dry run: 1 change(s) not committed");
    assert_eq!(automator.store().pending_changes(), 1);
    assert!(inbox_items(&FileStore::open(&path).unwrap()).is_empty());

    let line = automator.finish(false).unwrap();
    assert_eq!(line, "Committed 1 change(s)");
    assert_eq!(inbox_items(&FileStore::open(&path).unwrap()).len(), 1);
}

#[test]
fn test_run_advances_recurrence_from_injected_date() {
    let (store, _dir) = open_store(
        vec![inbox(), project("habits", "HABITS")],
        vec![due(
            item("read", "[9] Read", "habits", None, 1),
            days_from_today(-2),
            "every day",
        )],
    );
    let mut automator = Automator::new(store, Config::default());
    let plan = RunPlan {
        update_habits: true,
        ..RunPlan::default()
    };

    automator.run(&plan, at_hour(today(), 22)).unwrap();

    let read = get(automator.store(), "read");
    assert_eq!(read.content, "[0] Read");
    assert_eq!(read.due_date(), Some(days_from_today(1)));
}
