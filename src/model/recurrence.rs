use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Recurrence recognised from a due string
///
/// Only the handful of shapes the automations rely on are understood; anything
/// else is left to the store to decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// "every day"
    Daily,
    /// "every workday" (Monday to Friday)
    Workdays,
    /// "every monday", "every mon, thu", ...
    Weekdays(Vec<Weekday>),
    /// "every 3 days", "every other week", ...; stepped from the due date
    Interval(Duration),
}

/// Lowercase English name of a weekday (e.g., "monday")
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Check if a weekday falls on Monday to Friday
pub fn is_workday(weekday: Weekday) -> bool {
    !matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn parse_weekday(token: &str) -> Option<Weekday> {
    match token {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

impl Recurrence {
    /// Parse a due string into a recurrence, if it is one we understand
    pub fn parse(due_string: &str) -> Option<Self> {
        let lowered = due_string.trim().to_lowercase();
        match lowered.as_str() {
            "every day" | "daily" | "everyday" => return Some(Recurrence::Daily),
            "every workday" | "every weekday" => return Some(Recurrence::Workdays),
            _ => {}
        }

        let days = lowered.strip_prefix("every ")?;
        if let Some(interval) = parse_interval(days) {
            return Some(Recurrence::Interval(interval));
        }

        let weekdays: Option<Vec<Weekday>> = days
            .split([',', ' '])
            .map(str::trim)
            .filter(|token| !token.is_empty() && *token != "and")
            .map(parse_weekday)
            .collect();

        match weekdays {
            Some(weekdays) if !weekdays.is_empty() => Some(Recurrence::Weekdays(weekdays)),
            _ => None,
        }
    }

    /// Check if the recurrence fires on the given weekday
    ///
    /// Interval recurrences are not tied to a weekday and never fire here.
    pub fn fires_on(&self, weekday: Weekday) -> bool {
        match self {
            Recurrence::Daily => true,
            Recurrence::Workdays => is_workday(weekday),
            Recurrence::Weekdays(days) => days.contains(&weekday),
            Recurrence::Interval(_) => false,
        }
    }

    /// Calculate the next due date after completing on `today`
    ///
    /// Weekday-based recurrences take the first matching date strictly after
    /// both `due_date` and `today`. Intervals step from `due_date` until the
    /// date is strictly after `today`.
    pub fn advance(&self, due_date: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
        let Recurrence::Interval(step) = self else {
            let from = due_date.map_or(today, |date| date.max(today));
            return self.next_after(from);
        };

        let mut next_date = due_date.unwrap_or(today) + *step;
        if next_date <= today {
            let behind = (today - next_date).num_days();
            let steps = behind / step.num_days() + 1;
            next_date += Duration::days(step.num_days() * steps);
        }
        next_date
    }

    /// Calculate the first occurrence strictly after `from_date`
    pub fn next_after(&self, from_date: NaiveDate) -> NaiveDate {
        if let Recurrence::Interval(step) = self {
            return from_date + *step;
        }

        let mut next_date = from_date + Duration::days(1);
        // Every weekday-based variant fires at least once a week, so seven steps suffice
        for _ in 0..7 {
            if self.fires_on(next_date.weekday()) {
                return next_date;
            }
            next_date += Duration::days(1);
        }
        next_date
    }
}

/// Parse "N days", "N weeks", "other day", "other week" or "week"
fn parse_interval(rest: &str) -> Option<Duration> {
    let mut tokens = rest.split_whitespace();
    let first = tokens.next()?;
    let (count, unit) = match (first, tokens.next()) {
        ("other", Some(unit)) => (2, unit),
        ("week", None) => (1, "week"),
        (count, Some(unit)) => (count.parse::<i64>().ok().filter(|n| *n > 0)?, unit),
        _ => return None,
    };
    if tokens.next().is_some() {
        return None;
    }

    match unit {
        "day" | "days" => Some(Duration::days(count)),
        "week" | "weeks" => Some(Duration::weeks(count)),
        _ => None,
    }
}
