//! Hygiene handlers

use crate::Automator;
use crate::hygiene::{self, RareHygieneReport};
use crate::store::ItemStore;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

impl<S: ItemStore> Automator<S> {
    /// Frequent pass: clear priorities of tasks not due today
    ///
    /// # Returns
    /// The number of tasks whose priority was cleared
    pub fn run_frequent_hygiene(&mut self, today: NaiveDate) -> Result<usize> {
        hygiene::run_frequent(&mut self.store, today).context("Frequent hygiene failed")
    }

    /// Rare pass: recount timeboxes and relocate scheduled tasks matching `now`
    pub fn run_rare_hygiene(&mut self, now: NaiveDateTime) -> Result<RareHygieneReport> {
        hygiene::run_rare(&mut self.store, now).context("Rare hygiene failed")
    }

    pub(crate) fn handle_frequent_hygiene(&mut self, today: NaiveDate) -> Result<String> {
        let changed = self.run_frequent_hygiene(today)?;
        Ok(format!("Frequent hygiene: cleared {} priority(ies)", changed))
    }

    pub(crate) fn handle_rare_hygiene(&mut self, now: NaiveDateTime) -> Result<String> {
        let report = self.run_rare_hygiene(now)?;
        Ok(format!(
            "Rare hygiene: {} timebox(es) updated, {} scheduled item(s) copied",
            report.timeboxes_updated, report.scheduled_copied
        ))
    }
}
