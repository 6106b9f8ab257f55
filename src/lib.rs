//! Task Automator Library
//!
//! This library automates a personal task list kept in an item store: it copies
//! template checklists into the inbox, keeps habit streak counters up to date,
//! and runs hygiene passes over priorities, timeboxes and scheduled tasks.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **Orchestration Layer**: `Automator` - Runs the selected operations and commits once
//! - **Rule Layer**: `copier`, `habits`, `hygiene`, `parsers` - Decide which mutations to apply
//! - **Persistence Layer**: `store` trait with the TOML-backed `FileStore`, optionally git-synced
//!
//! Every rule takes the current date or time as a parameter; nothing below
//! the command line reads the clock.
//!
//! # Example
//!
//! ```no_run
//! use task_automator::{Automator, Config, local_now};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut automator = Automator::open("tasks.toml", Config::default())?;
//!     let now = local_now();
//!     automator.copy_checklist("start-of-day")?;
//!     automator.update_habits(now.date())?;
//!     automator.commit()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod copier;
mod git_ops;
mod handlers;
pub mod habits;
pub mod hygiene;
pub mod logging;
pub mod model;
pub mod parsers;
mod storage;
pub mod store;

use anyhow::{Context, Result};
use std::path::Path;

// Re-export commonly used types
pub use config::Config;
pub use git_ops::GitSync;
pub use handlers::RunPlan;
pub use model::{Due, Item, ItemData, Priority, Project, local_now};
pub use storage::{FileStore, RunLock};
pub use store::{ItemStore, ItemUpdate, StoreError};

/// Runs automations against an item store and commits their changes in one batch
///
/// Operations only mutate the store's in-memory snapshot; nothing is persisted
/// until [`Automator::commit`].
pub struct Automator<S: ItemStore> {
    pub(crate) store: S,
    pub(crate) config: Config,
}

impl Automator<FileStore> {
    /// Create an automator over a TOML data file
    ///
    /// # Arguments
    /// * `data_file` - Path to the data file (a missing file starts empty)
    /// * `config` - Automation settings (inbox name and git sync are applied to the store)
    pub fn open(data_file: impl AsRef<Path>, config: Config) -> Result<Self> {
        let data_file = data_file.as_ref();
        let store = FileStore::open(data_file)
            .with_context(|| format!("Failed to open {}", data_file.display()))?
            .with_inbox_name(config.inbox_project.clone())
            .with_git_sync(config.sync_git);
        Ok(Self::new(store, config))
    }
}

impl<S: ItemStore> Automator<S> {
    /// Create an automator over any item store
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flush every buffered change in one commit
    ///
    /// # Returns
    /// The number of changes committed
    pub fn commit(&mut self) -> Result<usize> {
        let pending = self.store.pending_changes();
        self.store.commit().context("Failed to commit changes")?;
        Ok(pending)
    }
}
