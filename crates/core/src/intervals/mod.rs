//! Opening-hours intervals and their two extractors.
//!
//! Free text yields weekday-set intervals ranked by how few days they cover.
//! Tables yield single-weekday intervals bounded by a validity window, ranked
//! by how narrow that window is. Both expose the same [`OpeningInterval`]
//! capability so the projector is written once.

pub mod table;
pub mod text;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::days::WeekdaySet;
use crate::schedule::{Schedule, project};

pub use table::{TableCell, TableEntry, ValidityWindow, extract_table, parse_caption};
pub use text::{extract_text, weekday_lines};

/// Shared capability of both interval shapes.
pub trait OpeningInterval {
    /// Whether this interval applies on `date`.
    fn matches(&self, date: NaiveDate) -> bool;

    /// Lower is more specific.
    fn specificity_key(&self) -> i64;

    fn hours(&self) -> &str;
}

/// A `<day-range>: <hours>` line from free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextInterval {
    pub weekdays: WeekdaySet,
    pub hours: String,
}

impl FreeTextInterval {
    /// Number of weekdays covered.
    pub fn specificity(&self) -> usize {
        self.weekdays.len()
    }
}

impl OpeningInterval for FreeTextInterval {
    fn matches(&self, date: NaiveDate) -> bool {
        self.weekdays.contains(date.weekday())
    }

    fn specificity_key(&self) -> i64 {
        self.specificity() as i64
    }

    fn hours(&self) -> &str {
        &self.hours
    }
}

/// One table cell: a weekday's hours within a caption's validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedInterval {
    pub weekday: Weekday,
    pub valid_from: NaiveDate,
    pub valid_to: NaiveDate,
    pub hours: String,
}

impl DatedInterval {
    pub fn new(weekday: Weekday, window: ValidityWindow, hours: impl Into<String>) -> Self {
        Self { weekday, valid_from: window.start(), valid_to: window.end(), hours: hours.into() }
    }

    /// Length of the validity window in days.
    pub fn span(&self) -> i64 {
        (self.valid_to - self.valid_from).num_days()
    }
}

impl OpeningInterval for DatedInterval {
    fn matches(&self, date: NaiveDate) -> bool {
        date.weekday() == self.weekday && self.valid_from <= date && date <= self.valid_to
    }

    fn specificity_key(&self) -> i64 {
        self.span()
    }

    fn hours(&self) -> &str {
        &self.hours
    }
}

/// Intervals extracted from one document. Never mixes the two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "intervals", rename_all = "snake_case")]
pub enum IntervalSet {
    FreeText(Vec<FreeTextInterval>),
    Table(Vec<DatedInterval>),
}

impl IntervalSet {
    pub fn len(&self) -> usize {
        match self {
            IntervalSet::FreeText(intervals) => intervals.len(),
            IntervalSet::Table(intervals) => intervals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Project onto the seven days starting at `anchor`.
    pub fn project(&self, anchor: NaiveDate) -> Schedule {
        match self {
            IntervalSet::FreeText(intervals) => project(intervals, anchor),
            IntervalSet::Table(intervals) => project(intervals, anchor),
        }
    }
}
