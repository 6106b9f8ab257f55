//! Operation handlers for the automator
//!
//! Each operation lives in its own file as an `impl Automator` block; this
//! module ties them together into a single run.

pub mod checklist;
pub mod habits;
pub mod hygiene;

use crate::Automator;
use crate::store::ItemStore;
use anyhow::Result;
use chrono::NaiveDateTime;

/// Operations selected for one run, executed in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunPlan {
    /// Checklist keys or project names to copy into the inbox
    pub checklists: Vec<String>,
    pub update_habits: bool,
    pub frequent_hygiene: bool,
    pub rare_hygiene: bool,
}

impl RunPlan {
    /// Check if no operation is selected
    pub fn is_empty(&self) -> bool {
        self.checklists.is_empty()
            && !self.update_habits
            && !self.frequent_hygiene
            && !self.rare_hygiene
    }
}

impl<S: ItemStore> Automator<S> {
    /// Execute every selected operation against `now`, without committing
    ///
    /// # Returns
    /// One human-readable summary line per operation
    pub fn run(&mut self, plan: &RunPlan, now: NaiveDateTime) -> Result<Vec<String>> {
        let mut summary = Vec::new();

        for checklist in &plan.checklists {
            summary.push(self.handle_checklist(checklist)?);
        }
        if plan.update_habits {
            summary.push(self.handle_update_habits(now.date())?);
        }
        if plan.frequent_hygiene {
            summary.push(self.handle_frequent_hygiene(now.date())?);
        }
        if plan.rare_hygiene {
            summary.push(self.handle_rare_hygiene(now)?);
        }

        Ok(summary)
    }

    /// Commit the run, or only report what would be committed on a dry run
    ///
    /// # Returns
    /// A human-readable summary line
    pub fn finish(&mut self, dry_run: bool) -> Result<String> {
        if dry_run {
            return Ok(format!(
                "Dry run: {} change(s) not committed",
                self.store.pending_changes()
            ));
        }

        let committed = self.commit()?;
        Ok(format!("Committed {} change(s)", committed))
    }
}
