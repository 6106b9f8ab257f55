//! Periodic hygiene passes
//!
//! - priority normalization: only tasks due today keep a priority
//! - timebox recomputation: `[TBS done/total]` parents track their children
//! - schedule relocation: `[SCHED: hour weekday]` tasks are copied to the inbox
//!
//! Normalization is cheap and meant to run many times a day; the other two
//! form the "rare" pass, run once per day in a quiet hour so that a
//! scheduled task is not relocated twice within its matching hour.

use crate::copier;
use crate::model::{ItemTree, Priority};
use crate::parsers::{SCHEDULE_MARKER, ScheduleTag, TIMEBOX_MARKER, TimeboxProgress};
use crate::store::{ItemStore, ItemUpdate};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Outcome of the rare hygiene pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RareHygieneReport {
    /// Timebox parents whose title or collapsed flag changed
    pub timeboxes_updated: usize,
    /// Scheduled items copied into the inbox
    pub scheduled_copied: usize,
}

/// Clear the priority of every task that has a due date other than today
///
/// Tasks without a due date, or with one that does not parse, are left alone.
/// Returns the number of tasks changed.
pub fn normalize_priorities(store: &mut dyn ItemStore, today: NaiveDate) -> Result<usize> {
    let mut changed = 0;

    for item in store.list_all_items() {
        if item.due.is_none() {
            continue;
        }
        let Some(due_date) = item.due_date() else {
            tracing::debug!(item = %item.id, "malformed due date, skipping");
            continue;
        };

        if !item.priority.is_none() && due_date != today {
            store
                .update_item(&item.id, ItemUpdate::priority(Priority::NONE))
                .with_context(|| format!("Failed to clear priority of '{}'", item.id))?;
            changed += 1;
        }
    }

    tracing::info!(changed, "normalized priorities");
    Ok(changed)
}

/// Recount every timebox parent from its direct children and collapse it
///
/// Returns the number of parents changed.
pub fn recompute_timeboxes(store: &mut dyn ItemStore) -> Result<usize> {
    let items = store.list_all_items();
    let tree = ItemTree::from_items(items.clone());
    let mut changed = 0;

    for item in items.iter().filter(|i| i.content.starts_with(TIMEBOX_MARKER)) {
        let Some(progress) = TimeboxProgress::parse(&item.content) else {
            tracing::debug!(item = %item.id, content = %item.content, "malformed timebox title");
            continue;
        };

        let (total, completed) = tree
            .children(&item.id)
            .fold((0u32, 0u32), |(total, done), child| {
                (total + 1, done + u32::from(child.checked))
            });

        let content = progress.render(completed, total);
        if content == item.content && item.collapsed {
            continue;
        }
        let update = ItemUpdate::content(content).with_collapsed(true);

        store
            .update_item(&item.id, update)
            .with_context(|| format!("Failed to update timebox '{}'", item.id))?;
        changed += 1;
    }

    tracing::info!(changed, "recomputed timeboxes");
    Ok(changed)
}

/// Copy every open task whose schedule tag matches `now` into the inbox
///
/// Each matching task is copied once, with its unchecked subtree. Returns the
/// number of tasks copied.
pub fn relocate_scheduled(store: &mut dyn ItemStore, now: NaiveDateTime) -> Result<usize> {
    let items = store.list_all_items();
    let tree = ItemTree::from_items(items.clone());
    let due: Vec<String> = items
        .into_iter()
        .filter(|i| !i.checked && i.content.contains(SCHEDULE_MARKER))
        .filter(|i| ScheduleTag::parse(&i.content).is_some_and(|tag| tag.matches(now)))
        .map(|i| i.id)
        .collect();

    let mut copied = 0;
    for id in &due {
        if copier::copy_subtree(store, &tree, id, None)? > 0 {
            tracing::debug!(item = %id, "relocated scheduled item");
            copied += 1;
        }
    }

    tracing::info!(copied, %now, "relocated scheduled items");
    Ok(copied)
}

/// Frequent pass: priority normalization
pub fn run_frequent(store: &mut dyn ItemStore, today: NaiveDate) -> Result<usize> {
    normalize_priorities(store, today)
}

/// Rare pass: timebox recomputation, then schedule relocation
pub fn run_rare(store: &mut dyn ItemStore, now: NaiveDateTime) -> Result<RareHygieneReport> {
    Ok(RareHygieneReport {
        timeboxes_updated: recompute_timeboxes(store)?,
        scheduled_copied: relocate_scheduled(store, now)?,
    })
}
