//! Checklist handler

use crate::Automator;
use crate::copier::{self, CopyReport};
use crate::store::ItemStore;
use anyhow::{Context, Result};

impl<S: ItemStore> Automator<S> {
    /// Copy a template project's open items into the inbox
    ///
    /// # Arguments
    /// * `project_name` - Exact project name; the first project with this name is used
    pub fn copy_project_contents_to_inbox(&mut self, project_name: &str) -> Result<CopyReport> {
        copier::copy_project_contents_to_inbox(&mut self.store, project_name)
            .with_context(|| format!("Failed to copy checklist '{}'", project_name))
    }

    /// Copy a configured checklist into the inbox
    ///
    /// # Arguments
    /// * `key_or_name` - Key of the `[checklists]` table (e.g., "start-of-day"), or a project name
    pub fn copy_checklist(&mut self, key_or_name: &str) -> Result<CopyReport> {
        let project_name = self.config.checklist_project(key_or_name).to_string();
        self.copy_project_contents_to_inbox(&project_name)
    }

    pub(crate) fn handle_checklist(&mut self, key_or_name: &str) -> Result<String> {
        let project_name = self.config.checklist_project(key_or_name).to_string();
        let report = self.copy_project_contents_to_inbox(&project_name)?;
        Ok(format!(
            "Checklist '{}': copied {} item(s) ({} top-level)",
            project_name, report.items, report.roots
        ))
    }
}
