//! Run configuration loaded from an optional TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Automation settings
///
/// Every key is optional in the file; missing keys take the defaults below.
/// A `[checklists]` table replaces the default checklist table as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project whose top-level tasks are habits
    pub habit_project: String,
    /// Inbox project name, used when no project is flagged `inbox = true`
    pub inbox_project: String,
    /// Record each commit in the data file's git repository
    pub sync_git: bool,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Checklist key → template project name
    pub checklists: BTreeMap<String, String>,
}

pub const START_OF_DAY: &str = "start-of-day";
pub const END_OF_DAY: &str = "end-of-day";
pub const WEEKLY_REVIEW: &str = "weekly-review";

impl Default for Config {
    fn default() -> Self {
        let checklists = [
            (START_OF_DAY, "Start-of-Day Checklist"),
            (END_OF_DAY, "End-of-Day Checklist"),
            (WEEKLY_REVIEW, "Weekly Review Checklist"),
        ]
        .into_iter()
        .map(|(key, name)| (key.to_string(), name.to_string()))
        .collect();

        Self {
            habit_project: "HABITS".to_string(),
            inbox_project: "Inbox".to_string(),
            sync_git: false,
            log_level: "info".to_string(),
            checklists,
        }
    }
}

impl Config {
    /// Load a configuration file; the file must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load the given file, or fall back to defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve a checklist key to its project name
    ///
    /// Unknown keys are taken to be project names themselves.
    pub fn checklist_project<'a>(&'a self, key_or_name: &'a str) -> &'a str {
        self.checklists
            .get(key_or_name)
            .map(String::as_str)
            .unwrap_or(key_or_name)
    }
}
