//! Habit handler

use crate::Automator;
use crate::habits::{self, HabitReport};
use crate::store::ItemStore;
use anyhow::{Context, Result};
use chrono::NaiveDate;

impl<S: ItemStore> Automator<S> {
    /// Reset missed habits and count up completed ones
    ///
    /// Meant to run at the end of the day: habits still due by `today` were
    /// missed, habits that recur today but already moved on were done.
    pub fn update_habits(&mut self, today: NaiveDate) -> Result<HabitReport> {
        let project = self.config.habit_project.clone();
        habits::update_habits(&mut self.store, &project, today)
            .with_context(|| format!("Failed to update habits in '{}'", project))
    }

    pub(crate) fn handle_update_habits(&mut self, today: NaiveDate) -> Result<String> {
        let report = self.update_habits(today)?;
        Ok(format!(
            "Habits: {} reset, {} incremented, {} skipped",
            report.reset, report.incremented, report.skipped
        ))
    }
}
