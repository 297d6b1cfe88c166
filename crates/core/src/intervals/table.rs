//! Tabular extraction from caption-dated opening-time tables.
//!
//! A table's caption carries its validity window (`23.09.24 - 31.07.25`).
//! Body rows carry a weekday label that applies to every following label-less
//! row or standalone cell until the next label appears.

use std::sync::LazyLock;

use chrono::{NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::DatedInterval;
use crate::Error;
use crate::days::resolve_day;

static CAPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}\.\d{2}\.\d{2})\s*[-–]\s*(\d{2}\.\d{2}\.\d{2})").expect("invalid caption pattern")
});

static TIME_LIKE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("invalid time pattern"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace pattern"));

/// Marker in a cell title for slots reserved to school classes.
const SCHOOL_MARKER: &str = "Schul";

/// Inclusive date range from a table caption. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    from: NaiveDate,
    to: NaiveDate,
}

impl ValidityWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }
}

/// A data cell as read from the document, mobile-only text already removed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    /// The cell's title annotation, e.g. `öffentl. Schwimmen`.
    pub title: Option<String>,
}

impl TableCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), title: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn is_school_only(&self) -> bool {
        self.title.as_deref().is_some_and(|t| t.contains(SCHOOL_MARKER))
    }

    fn is_time_like(&self) -> bool {
        TIME_LIKE.is_match(&self.text)
    }
}

/// One body entry in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEntry {
    /// A row: an optional weekday label header and its first data cell.
    Row { label: Option<String>, cell: Option<TableCell> },
    /// A cell with no row wrapper. Only time-like cells count as data.
    Cell(TableCell),
}

/// Parse the validity window out of a caption.
///
/// Errors when the caption has no `DD.MM.YY - DD.MM.YY` pair, a date is
/// invalid, or the window runs backwards.
pub fn parse_caption(caption: &str) -> Result<ValidityWindow, Error> {
    let caps = CAPTION_PATTERN
        .captures(caption)
        .ok_or_else(|| Error::ParseFailed(format!("caption has no validity range: {}", caption.trim())))?;

    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, "%d.%m.%y").map_err(|e| Error::ParseFailed(format!("invalid date {s}: {e}")))
    };
    let from = parse(&caps[1])?;
    let to = parse(&caps[2])?;

    ValidityWindow::new(from, to)
        .ok_or_else(|| Error::ParseFailed(format!("validity range ends before it starts: {from} > {to}")))
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_hours(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Extract dated intervals from one table.
///
/// The current weekday is fold state: a labelled row sets it (an unknown
/// label clears it), everything else inherits it. Entries without a current
/// weekday, school-only cells and empty cells produce nothing.
pub fn extract_table(caption: &str, entries: &[TableEntry]) -> Result<Vec<DatedInterval>, Error> {
    let window = parse_caption(caption)?;

    let (_, intervals) = entries.iter().fold(
        (None::<Weekday>, Vec::new()),
        |(current, mut intervals), entry| {
            let (current, cell) = match entry {
                TableEntry::Row { label: Some(label), cell } => (resolve_day(label), cell.as_ref()),
                TableEntry::Row { label: None, cell } => (current, cell.as_ref()),
                TableEntry::Cell(cell) => (current, Some(cell).filter(|c| c.is_time_like())),
            };

            if let (Some(weekday), Some(cell)) = (current, cell)
                && !cell.is_school_only()
            {
                let hours = normalize_hours(&cell.text);
                if !hours.is_empty() {
                    intervals.push(DatedInterval::new(weekday, window, hours));
                }
            }

            (current, intervals)
        },
    );

    Ok(intervals)
}
