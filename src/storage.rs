//! TOML file backend for the item store
//!
//! The whole data file is loaded into memory at open, mutated in place while
//! rules run, and written back in one piece on commit.

use crate::git_ops::GitSync;
use crate::model::{Item, ItemData, Recurrence};
use crate::store::{ItemStore, ItemUpdate, StoreError};
use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// A buffered mutation, kept for commit reporting
#[derive(Debug, Clone, PartialEq, Eq)]
enum Change {
    Created,
    Updated,
    Closed,
}

/// Item store persisted as a single TOML file
pub struct FileStore {
    file_path: PathBuf,
    data: ItemData,
    inbox_name: String,
    sync_git: bool,
    pending: Vec<Change>,
}

impl FileStore {
    /// Open a data file; a missing file loads as an empty store
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let file_path = file_path.as_ref().to_path_buf();
        let data = Self::load(&file_path)?;
        tracing::debug!(
            path = %file_path.display(),
            projects = data.projects().len(),
            items = data.items().len(),
            "loaded data file"
        );
        Ok(Self {
            file_path,
            data,
            inbox_name: "Inbox".to_string(),
            sync_git: false,
            pending: Vec::new(),
        })
    }

    /// Name of the inbox project used when none is flagged `inbox = true`
    pub fn with_inbox_name(mut self, name: impl Into<String>) -> Self {
        self.inbox_name = name.into();
        self
    }

    /// Record each commit in the git repository containing the data file
    pub fn with_git_sync(mut self, sync_git: bool) -> Self {
        self.sync_git = sync_git;
        self
    }

    /// Read a data file
    pub fn load(file_path: &Path) -> Result<ItemData, StoreError> {
        if !file_path.exists() {
            return Ok(ItemData::new());
        }

        let content = fs::read_to_string(file_path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write a data file through a temporary sibling and a rename
    pub fn save(file_path: &Path, data: &ItemData) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(data)?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "tasks.toml".to_string());
        let temp_path = file_path.with_file_name(format!(".{}.tmp", file_name));
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, file_path)?;
        Ok(())
    }

    fn commit_message(&self) -> String {
        let (mut created, mut updated, mut closed) = (0, 0, 0);
        for change in &self.pending {
            match change {
                Change::Created => created += 1,
                Change::Updated => updated += 1,
                Change::Closed => closed += 1,
            }
        }
        format!(
            "Automation run: {} change(s)\n\ncreated: {}\nupdated: {}\nclosed: {}",
            self.pending.len(),
            created,
            updated,
            closed
        )
    }
}

impl ItemStore for FileStore {
    fn find_project_id_by_name(&self, name: &str) -> Option<String> {
        self.data.find_project_id_by_name(name)
    }

    fn inbox_project_id(&self) -> Option<String> {
        self.data.inbox_project_id(&self.inbox_name)
    }

    fn list_items_in_project(&self, project_id: &str, include_checked: bool) -> Vec<Item> {
        self.data.items_in_project(project_id, include_checked)
    }

    fn list_all_items(&self) -> Vec<Item> {
        self.data.items().to_vec()
    }

    fn get_item(&self, id: &str) -> Option<Item> {
        self.data.find_item(id).cloned()
    }

    fn create_item(
        &mut self,
        content: &str,
        parent_id: Option<&str>,
        child_order: Option<i64>,
    ) -> Result<Item, StoreError> {
        let project_id = match parent_id {
            Some(parent_id) => self
                .data
                .find_item(parent_id)
                .map(|parent| parent.project_id.clone())
                .ok_or_else(|| StoreError::ItemNotFound(parent_id.to_string()))?,
            None => self
                .inbox_project_id()
                .ok_or_else(|| StoreError::NoInbox(self.inbox_name.clone()))?,
        };

        let child_order =
            child_order.unwrap_or_else(|| self.data.next_child_order(&project_id, parent_id));

        let item = Item {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.to_string(),
            project_id,
            parent_id: parent_id.map(str::to_string),
            child_order,
            ..Default::default()
        };

        self.data.add_item(item.clone());
        self.pending.push(Change::Created);
        Ok(item)
    }

    fn update_item(&mut self, id: &str, update: ItemUpdate) -> Result<(), StoreError> {
        let item = self
            .data
            .find_item_mut(id)
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))?;

        if let Some(content) = update.content {
            item.content = content;
        }
        if let Some(priority) = update.priority {
            item.priority = priority;
        }
        if let Some(collapsed) = update.collapsed {
            item.collapsed = collapsed;
        }

        self.pending.push(Change::Updated);
        Ok(())
    }

    fn close_item(&mut self, id: &str, today: NaiveDate) -> Result<(), StoreError> {
        let item = self
            .data
            .find_item_mut(id)
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))?;

        match item.due.as_mut() {
            Some(due) if is_recurring(&due.string) => match Recurrence::parse(&due.string) {
                Some(recurrence) => {
                    let next = recurrence.advance(due.parse_date().ok(), today);
                    tracing::debug!(item = id, next = %next, "advanced recurring item");
                    due.date = next.format("%Y-%m-%d").to_string();
                }
                None => {
                    tracing::warn!(
                        item = id,
                        due = %due.string,
                        "unsupported recurrence, leaving item open"
                    );
                }
            },
            _ => item.checked = true,
        }

        self.pending.push(Change::Closed);
        Ok(())
    }

    fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if self.pending.is_empty() {
            tracing::debug!("nothing to commit");
            return Ok(());
        }

        Self::save(&self.file_path, &self.data)?;
        tracing::info!(
            path = %self.file_path.display(),
            changes = self.pending.len(),
            "committed changes"
        );

        if self.sync_git {
            match GitSync::discover(&self.file_path) {
                Some(git) => git
                    .sync(&self.file_path, &self.commit_message())
                    .map_err(StoreError::Sync)?,
                None => tracing::debug!("data file is not in a git repository, skipping sync"),
            }
        }

        self.pending.clear();
        Ok(())
    }
}

/// Check if a due string describes a repeating date
///
/// Such items are never checked off on close, even when the exact shape is
/// not understood.
fn is_recurring(due_string: &str) -> bool {
    let lowered = due_string.trim().to_lowercase();
    lowered.starts_with("every") || lowered == "daily"
}

/// Exclusive lock held for the duration of one automation run
///
/// The lock is a `<data file>.lock` file created with create-new semantics and
/// removed on drop, so overlapping runs cannot both relocate the same
/// scheduled items or double-count habits.
pub struct RunLock {
    path: PathBuf,
    _file: File,
}

impl RunLock {
    /// Acquire the lock next to `data_file`
    pub fn acquire(data_file: &Path) -> anyhow::Result<Self> {
        let mut lock_name = data_file.as_os_str().to_owned();
        lock_name.push(".lock");
        let path = PathBuf::from(lock_name);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => anyhow::anyhow!(
                    "Another run holds {}; remove it if no run is in progress",
                    path.display()
                ),
                _ => anyhow::Error::new(e)
                    .context(format!("Failed to create lock file {}", path.display())),
            })?;

        Ok(Self { path, _file: file })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), %e, "failed to remove lock file");
        }
    }
}
