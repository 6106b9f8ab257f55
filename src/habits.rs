//! Habit counter tracking
//!
//! Habits are the top-level tasks of the habit project, titled
//! `[<counter>] <name>` and given a recurring due date. Run once at the end
//! of the day: a habit still due (overdue) was missed and starts over, while
//! a habit that recurs today but is no longer due was done and counts up.

use crate::model::{Item, is_workday, weekday_name};
use crate::parsers::HabitCounter;
use crate::store::{ItemStore, ItemUpdate};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};

/// Where a habit stands at evaluation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitState {
    /// Due date is today or earlier: the habit was not done
    Overdue,
    /// Recurs today and is not overdue: the habit was done
    DueTodayNotOverdue,
    /// Neither
    NotDue,
}

/// Outcome of a habit update pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HabitReport {
    pub reset: usize,
    pub incremented: usize,
    /// Habits without a usable due date or counter
    pub skipped: usize,
}

/// Check if a due string says the habit recurs on `weekday`
///
/// The weekday test is a plain substring match on the lowercase day name, so
/// a due string that merely mentions a day (e.g. "every 2 weeks from monday")
/// also matches.
pub fn habit_due_today(due_string: &str, weekday: Weekday) -> bool {
    if due_string == "every day" {
        return true;
    }
    if due_string == "every workday" && is_workday(weekday) {
        return true;
    }
    due_string.contains(weekday_name(weekday))
}

/// Classify a habit against `today`
///
/// Returns `None` when the item has no due date or the date is malformed.
pub fn classify(item: &Item, today: NaiveDate) -> Option<HabitState> {
    let due = item.due.as_ref()?;
    let due_date = due.parse_date().ok()?;

    let state = if due_date <= today {
        HabitState::Overdue
    } else if habit_due_today(&due.string, today.weekday()) {
        HabitState::DueTodayNotOverdue
    } else {
        HabitState::NotDue
    };
    Some(state)
}

/// Reset missed habits and count up completed ones
///
/// A missing habit project is nothing to do.
pub fn update_habits(
    store: &mut dyn ItemStore,
    habit_project: &str,
    today: NaiveDate,
) -> Result<HabitReport> {
    let mut report = HabitReport::default();

    let Some(project_id) = store.find_project_id_by_name(habit_project) else {
        tracing::warn!(project = habit_project, "habit project not found");
        return Ok(report);
    };

    let habits = store
        .list_items_in_project(&project_id, false)
        .into_iter()
        .filter(Item::is_root);

    for habit in habits {
        let Some(state) = classify(&habit, today) else {
            tracing::debug!(item = %habit.id, "habit has no usable due date, skipping");
            report.skipped += 1;
            continue;
        };

        if state == HabitState::NotDue {
            continue;
        }

        let Some(counter) = HabitCounter::parse(&habit.content) else {
            tracing::debug!(
                item = %habit.id,
                content = %habit.content,
                "no habit counter in title"
            );
            report.skipped += 1;
            continue;
        };

        match state {
            HabitState::Overdue => {
                store
                    .update_item(&habit.id, ItemUpdate::content(counter.render(0)))
                    .and_then(|_| store.close_item(&habit.id, today))
                    .with_context(|| format!("Failed to reset habit '{}'", habit.id))?;
                report.reset += 1;
            }
            HabitState::DueTodayNotOverdue => {
                store
                    .update_item(
                        &habit.id,
                        ItemUpdate::content(counter.render(counter.counter.saturating_add(1))),
                    )
                    .with_context(|| format!("Failed to increment habit '{}'", habit.id))?;
                report.incremented += 1;
            }
            HabitState::NotDue => {}
        }
    }

    tracing::info!(
        reset = report.reset,
        incremented = report.incremented,
        skipped = report.skipped,
        "updated habits"
    );
    Ok(report)
}
