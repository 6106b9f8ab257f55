//! Backend item store boundary
//!
//! The rule engines never talk to a backend directly; they go through
//! [`ItemStore`], which buffers every write until [`ItemStore::commit`].

use crate::model::{Item, Priority};
use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by an item store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item '{0}' not found")]
    ItemNotFound(String),

    #[error("no inbox project: flag a project with `inbox = true` or create one named '{0}'")]
    NoInbox(String),

    #[error("failed to access data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse data file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize data file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("git sync failed: {0:#}")]
    Sync(anyhow::Error),
}

/// Partial update of an item; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemUpdate {
    pub content: Option<String>,
    pub priority: Option<Priority>,
    pub collapsed: Option<bool>,
}

impl ItemUpdate {
    /// Replace the content
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Replace the priority
    pub fn priority(priority: Priority) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Also set the collapsed flag
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }
}

/// Operations the automations need from a task backend
///
/// Reads observe the in-memory snapshot including writes made earlier in the
/// same run; writes are buffered and only persisted by `commit`.
pub trait ItemStore {
    /// ID of the first project with this name
    fn find_project_id_by_name(&self, name: &str) -> Option<String>;

    /// ID of the inbox project
    fn inbox_project_id(&self) -> Option<String>;

    /// Items of a project, optionally including completed ones
    fn list_items_in_project(&self, project_id: &str, include_checked: bool) -> Vec<Item>;

    /// Every item, completed ones included
    fn list_all_items(&self) -> Vec<Item>;

    /// Look up a single item
    fn get_item(&self, id: &str) -> Option<Item>;

    /// Create an item
    ///
    /// With a parent the item joins the parent's project; without one it lands
    /// at the top level of the inbox. `child_order = None` appends after the
    /// existing siblings.
    fn create_item(
        &mut self,
        content: &str,
        parent_id: Option<&str>,
        child_order: Option<i64>,
    ) -> Result<Item, StoreError>;

    /// Update selected fields of an item
    fn update_item(&mut self, id: &str, update: ItemUpdate) -> Result<(), StoreError>;

    /// Complete an item, advancing recurring due dates instead of checking them
    ///
    /// `today` is the date the completion counts for.
    fn close_item(&mut self, id: &str, today: NaiveDate) -> Result<(), StoreError>;

    /// Number of buffered, uncommitted mutations
    fn pending_changes(&self) -> usize;

    /// Flush buffered mutations
    fn commit(&mut self) -> Result<(), StoreError>;
}
