//! Parsers for state encoded in task titles
//!
//! Three independent formats are recognised:
//! - habit counter: `[12] Drink water`
//! - timebox progress: `[TBS 2/4] Morning routine`
//! - schedule tag: `Water plants [SCHED: 9 1]`
//!
//! A title that does not match is a normal skip, so every parser returns an
//! `Option` rather than a `Result`.

use chrono::{Datelike, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

/// Literal prefix marking a timebox parent
pub const TIMEBOX_MARKER: &str = "[TBS";

/// Literal marker opening a schedule tag
pub const SCHEDULE_MARKER: &str = "[SCHED:";

static HABIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\[(?P<counter>\d+)\](?P<text>.*)$").expect("valid habit regex")
});
static TIMEBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\[TBS\s*(?P<done>\d+)\s*/\s*(?P<total>\d+)\s*\](?P<text>.*)$")
        .expect("valid timebox regex")
});
static SCHEDULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[SCHED:\s*(?P<hour>\d{1,2}|\*)\s+(?P<day>\d|\*)\s*\]")
        .expect("valid schedule regex")
});

/// Habit counter parsed from `[<counter>]<text>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitCounter {
    pub counter: u32,
    /// Everything after the closing bracket, kept verbatim
    pub text: String,
}

impl HabitCounter {
    /// Parse a habit title; the counter must open the title
    pub fn parse(content: &str) -> Option<Self> {
        let caps = HABIT_RE.captures(content)?;
        Some(Self {
            counter: caps["counter"].parse().ok()?,
            text: caps["text"].to_string(),
        })
    }

    /// Render the title with a new counter value
    pub fn render(&self, counter: u32) -> String {
        format!("[{}]{}", counter, self.text)
    }
}

/// Timebox progress parsed from `[TBS <completed>/<total>]<text>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeboxProgress {
    pub completed: u32,
    pub total: u32,
    /// Everything after the closing bracket, kept verbatim
    pub text: String,
}

impl TimeboxProgress {
    /// Parse a timebox title; only titles starting with `[TBS` are considered
    pub fn parse(content: &str) -> Option<Self> {
        if !content.starts_with(TIMEBOX_MARKER) {
            return None;
        }
        let caps = TIMEBOX_RE.captures(content)?;
        Some(Self {
            completed: caps["done"].parse().ok()?,
            total: caps["total"].parse().ok()?,
            text: caps["text"].to_string(),
        })
    }

    /// Render the title with fresh progress numbers
    pub fn render(&self, completed: u32, total: u32) -> String {
        format!("[TBS {}/{}]{}", completed, total, self.text)
    }
}

/// One field of a schedule tag: a concrete value or the `*` wildcard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Any,
    Exactly(u32),
}

impl TagField {
    fn parse(raw: &str, range: std::ops::RangeInclusive<u32>) -> Option<Self> {
        if raw == "*" {
            return Some(TagField::Any);
        }
        let value: u32 = raw.parse().ok()?;
        range.contains(&value).then_some(TagField::Exactly(value))
    }

    /// Check if the field accepts `value`
    pub fn accepts(self, value: u32) -> bool {
        match self {
            TagField::Any => true,
            TagField::Exactly(expected) => expected == value,
        }
    }
}

/// Schedule tag parsed from `[SCHED: <hour> <day_of_week>]` anywhere in a title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTag {
    /// Hour of day, 0..=23
    pub hour: TagField,
    /// ISO weekday, 1 (Monday) ..= 7 (Sunday)
    pub weekday: TagField,
}

impl ScheduleTag {
    /// Find and parse the first valid schedule tag in a title
    ///
    /// Tags with out-of-range hours or weekdays are passed over.
    pub fn parse(content: &str) -> Option<Self> {
        SCHEDULE_RE.captures_iter(content).find_map(|caps| {
            Some(Self {
                hour: TagField::parse(&caps["hour"], 0..=23)?,
                weekday: TagField::parse(&caps["day"], 1..=7)?,
            })
        })
    }

    /// Check if the tag fires at the given local time
    pub fn matches(&self, now: NaiveDateTime) -> bool {
        self.hour.accepts(now.hour()) && self.weekday.accepts(now.weekday().number_from_monday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_habit_counter_parse() {
        let habit = HabitCounter::parse("[3] Drink water").unwrap();
        assert_eq!(habit.counter, 3);
        assert_eq!(habit.text, " Drink water");
        assert_eq!(habit.render(4), "[4] Drink water");
    }

    #[test]
    fn test_habit_counter_requires_prefix() {
        assert!(HabitCounter::parse("Drink water").is_none());
        assert!(HabitCounter::parse("Drink [3] water").is_none());
        assert!(HabitCounter::parse("[x] Drink water").is_none());
        assert!(HabitCounter::parse("[99999999999] Overflow").is_none());
    }

    #[test]
    fn test_habit_render_round_trip_keeps_text() {
        let original = HabitCounter::parse("[7]  Read [20 pages]").unwrap();
        let mut content = original.render(0);
        for n in 1..5 {
            content = HabitCounter::parse(&content).unwrap().render(n);
        }
        assert_eq!(content, "[4]  Read [20 pages]");
        assert_eq!(HabitCounter::parse(&content).unwrap().text, original.text);
    }

    #[test]
    fn test_timebox_parse_and_render() {
        let tb = TimeboxProgress::parse("[TBS 1/3] Morning routine").unwrap();
        assert_eq!((tb.completed, tb.total), (1, 3));
        assert_eq!(tb.text, " Morning routine");
        assert_eq!(tb.render(2, 4), "[TBS 2/4] Morning routine");

        let again = TimeboxProgress::parse(&tb.render(2, 4)).unwrap();
        assert_eq!(again.text, tb.text);
    }

    #[test]
    fn test_timebox_requires_marker_prefix() {
        assert!(TimeboxProgress::parse("Morning [TBS 1/3]").is_none());
        assert!(TimeboxProgress::parse("[TBS broken] Morning").is_none());
        assert!(TimeboxProgress::parse("[TBS 0/0]").is_some());
    }

    #[test]
    fn test_schedule_tag_anywhere() {
        let tag = ScheduleTag::parse("Water plants [SCHED: 9 1] weekly").unwrap();
        assert_eq!(tag.hour, TagField::Exactly(9));
        assert_eq!(tag.weekday, TagField::Exactly(1));

        let wild = ScheduleTag::parse("[SCHED: * *] Stretch").unwrap();
        assert_eq!(wild.hour, TagField::Any);
        assert_eq!(wild.weekday, TagField::Any);
    }

    #[test]
    fn test_schedule_tag_rejects_out_of_range() {
        assert!(ScheduleTag::parse("[SCHED: 24 1]").is_none());
        assert!(ScheduleTag::parse("[SCHED: 9 0]").is_none());
        assert!(ScheduleTag::parse("[SCHED: 9 8]").is_none());
        assert!(ScheduleTag::parse("[SCHED 9 1]").is_none());
    }

    #[test]
    fn test_schedule_tag_skips_invalid_first_tag() {
        let tag = ScheduleTag::parse("Review [SCHED: 99 1] budget [SCHED: 9 1]").unwrap();
        assert_eq!(tag.hour, TagField::Exactly(9));
        assert_eq!(tag.weekday, TagField::Exactly(1));
    }

    #[test]
    fn test_schedule_tag_matches() {
        // 2024-03-18 is a Monday
        let tag = ScheduleTag::parse("[SCHED: 9 1]").unwrap();
        assert!(tag.matches(at(2024, 3, 18, 9)));
        assert!(!tag.matches(at(2024, 3, 18, 10)));
        assert!(!tag.matches(at(2024, 3, 19, 9)));

        let any_hour = ScheduleTag::parse("[SCHED: * 7]").unwrap();
        assert!(any_hour.matches(at(2024, 3, 24, 0)));
        assert!(!any_hour.matches(at(2024, 3, 23, 0)));
    }
}
