//! Seven-day schedule projection.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::intervals::OpeningInterval;

/// Days covered by one projection, starting at the anchor date.
pub const SCHEDULE_DAYS: i64 = 7;

/// Text shown for a day with no matching interval.
pub const CLOSED_LABEL: &str = "Geschlossen";

/// Resolved hours for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "hours", rename_all = "snake_case")]
pub enum DayHours {
    Open(String),
    Closed,
}

impl DayHours {
    pub fn is_closed(&self) -> bool {
        matches!(self, DayHours::Closed)
    }
}

impl fmt::Display for DayHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayHours::Open(hours) => f.write_str(hours),
            DayHours::Closed => f.write_str(CLOSED_LABEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub hours: DayHours,
}

impl ScheduleDay {
    /// `2024-10-07 (Mon)`
    pub fn label(&self) -> String {
        self.date.format("%Y-%m-%d (%a)").to_string()
    }
}

/// Seven consecutive days of resolved hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days: Vec<ScheduleDay>,
}

impl Schedule {
    pub fn hours_on(&self, date: NaiveDate) -> Option<&DayHours> {
        self.days.iter().find(|day| day.date == date).map(|day| &day.hours)
    }

    pub fn is_closed_all_week(&self) -> bool {
        self.days.iter().all(|day| day.hours.is_closed())
    }
}

/// Project intervals onto `anchor` and the six days after it.
///
/// Pure in its inputs: the same intervals and anchor always give the same
/// schedule.
pub fn project<I: OpeningInterval>(intervals: &[I], anchor: NaiveDate) -> Schedule {
    let days = (0..SCHEDULE_DAYS)
        .map(|offset| {
            let date = anchor + Duration::days(offset);
            ScheduleDay { date, weekday: date.weekday(), hours: resolve_date(intervals, date) }
        })
        .collect();

    Schedule { days }
}

/// Most specific matches win; their distinct texts are joined with `"; "`.
fn resolve_date<I: OpeningInterval>(intervals: &[I], date: NaiveDate) -> DayHours {
    let matching: Vec<&I> = intervals.iter().filter(|iv| iv.matches(date)).collect();

    let Some(min_key) = matching.iter().map(|iv| iv.specificity_key()).min() else {
        return DayHours::Closed;
    };

    let mut texts: Vec<&str> = Vec::new();
    for interval in matching.iter().filter(|iv| iv.specificity_key() == min_key) {
        let hours = interval.hours();
        if !hours.is_empty() && !texts.contains(&hours) {
            texts.push(hours);
        }
    }

    if texts.is_empty() { DayHours::Closed } else { DayHours::Open(texts.join("; ")) }
}
