//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use task_automator::{Due, FileStore, Item, ItemData, ItemStore, Priority, Project};
use tempfile::TempDir;

/// Monday 2024-03-18
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

pub fn at_hour(date: NaiveDate, hour: u32) -> NaiveDateTime {
    date.and_hms_opt(hour, 15, 0).unwrap()
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        inbox: false,
    }
}

pub fn inbox() -> Project {
    Project {
        id: "inbox".to_string(),
        name: "Inbox".to_string(),
        inbox: true,
    }
}

/// Create a test item with minimal fields
pub fn item(id: &str, content: &str, project_id: &str, parent: Option<&str>, order: i64) -> Item {
    Item {
        id: id.to_string(),
        content: content.to_string(),
        project_id: project_id.to_string(),
        parent_id: parent.map(str::to_string),
        child_order: order,
        ..Default::default()
    }
}

pub fn checked(mut item: Item) -> Item {
    item.checked = true;
    item
}

pub fn due(mut item: Item, date: NaiveDate, string: &str) -> Item {
    item.due = Some(Due::new(date, string));
    item
}

pub fn with_priority(mut item: Item, priority: u8) -> Item {
    item.priority = Priority(priority);
    item
}

/// Write the fixture to a temporary data file and open a store over it
pub fn open_store(projects: Vec<Project>, items: Vec<Item>) -> (FileStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.toml");
    FileStore::save(&path, &ItemData::from_parts(projects, items)).unwrap();
    let store = FileStore::open(&path).unwrap();
    (store, dir)
}

pub fn get(store: &FileStore, id: &str) -> Item {
    store.get_item(id).unwrap()
}

/// Items of the inbox project
pub fn inbox_items(store: &FileStore) -> Vec<Item> {
    let inbox_id = store.inbox_project_id().unwrap();
    store.list_items_in_project(&inbox_id, true)
}

/// Children of an item ordered by `child_order`
pub fn children_of(store: &FileStore, parent_id: &str) -> Vec<Item> {
    let mut children: Vec<Item> = store
        .list_all_items()
        .into_iter()
        .filter(|i| i.parent_id.as_deref() == Some(parent_id))
        .collect();
    children.sort_by_key(|i| i.child_order);
    children
}
