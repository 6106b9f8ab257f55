use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Get the current wall-clock time in local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Task priority on a 1..=4 scale
///
/// `1` is the "no priority" sentinel; `4` is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub u8);

impl Priority {
    /// The "no priority" sentinel
    pub const NONE: Priority = Priority(1);

    /// Check if this is the "no priority" sentinel
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NONE
    }
}

/// Due-date descriptor attached to an item
///
/// `date` is kept as the raw backend text so that a single malformed record
/// can be skipped by date-based rules instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Due {
    /// Due date (format: YYYY-MM-DD, optionally followed by a time part)
    pub date: String,
    /// Human-readable recurrence text (e.g., "every day", "every monday")
    #[serde(default)]
    pub string: String,
}

impl Due {
    /// Create a due descriptor from a calendar date and a recurrence string
    pub fn new(date: NaiveDate, string: impl Into<String>) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            string: string.into(),
        }
    }

    /// Parse the calendar date of this due descriptor
    ///
    /// Accepts `YYYY-MM-DD` and `YYYY-MM-DDTHH:MM:SS`; the time part is dropped.
    pub fn parse_date(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").or_else(|err| {
            NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S")
                .map(|dt| dt.date())
                .map_err(|_| err)
        })
    }
}

/// A project: a named container of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: String,
    /// Display name (not guaranteed unique)
    pub name: String,
    /// Marks the inbox project, the destination of parentless item creations
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inbox: bool,
}

/// A single task node in a project's item tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Unique identifier
    pub id: String,
    /// Free-form title; may embed habit, timebox or schedule state
    pub content: String,
    /// Owning project ID
    pub project_id: String,
    /// Parent item ID (None = root of the project)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Ordering key among siblings
    pub child_order: i64,
    /// Completed flag
    pub checked: bool,
    /// Priority (1 = no priority)
    pub priority: Priority,
    /// Collapsed display flag
    pub collapsed: bool,
    /// Optional due-date descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            id: String::new(),
            content: String::new(),
            project_id: String::new(),
            parent_id: None,
            child_order: 0,
            checked: false,
            priority: Priority::NONE,
            collapsed: false,
            due: None,
        }
    }
}

impl Item {
    /// Check if this item sits at the top level of its project
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Parse the due date, if any
    ///
    /// Returns `None` both for items without a due date and for malformed dates.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due.as_ref().and_then(|due| due.parse_date().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_parse_plain_date() {
        let due = Due {
            date: "2024-03-15".to_string(),
            string: "every day".to_string(),
        };
        assert_eq!(
            due.parse_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_due_parse_datetime_keeps_date_part() {
        let due = Due {
            date: "2024-03-15T09:30:00".to_string(),
            string: String::new(),
        };
        assert_eq!(
            due.parse_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_malformed_due_date_is_none() {
        let item = Item {
            due: Some(Due {
                date: "next tuesday".to_string(),
                string: String::new(),
            }),
            ..Default::default()
        };
        assert!(item.due_date().is_none());
    }

    #[test]
    fn test_priority_sentinel() {
        assert!(Priority::default().is_none());
        assert!(!Priority(3).is_none());
    }
}
