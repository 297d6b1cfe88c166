//! German day tokens and wraparound-aware day ranges.
//!
//! Recognizes the two-letter abbreviations (`Mo`, `Di`, ...) and the full
//! names (`Montag`, `Dienstag`, ...). Matching is case-sensitive.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

const DAY_NAMES: [(&str, &str, Weekday); 7] = [
    ("Mo", "Montag", Weekday::Mon),
    ("Di", "Dienstag", Weekday::Tue),
    ("Mi", "Mittwoch", Weekday::Wed),
    ("Do", "Donnerstag", Weekday::Thu),
    ("Fr", "Freitag", Weekday::Fri),
    ("Sa", "Samstag", Weekday::Sat),
    ("So", "Sonntag", Weekday::Sun),
];

/// Two-letter abbreviations, used by the whole-document line scan.
pub const DAY_ABBREVIATIONS: [&str; 7] = ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"];

/// Ordered set of weekdays produced by a day token.
///
/// Order follows the token, so a wrapped range such as `Fr-Mo` keeps its
/// cyclic order (Fri, Sat, Sun, Mon).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdaySet(Vec<Weekday>);

impl WeekdaySet {
    pub fn single(day: Weekday) -> Self {
        Self(vec![day])
    }

    /// Every day from `start` to `end` inclusive, wrapping past Sunday when
    /// `start` comes after `end`.
    pub fn span(start: Weekday, end: Weekday) -> Self {
        let mut days = vec![start];
        let mut day = start;
        while day != end {
            day = day.succ();
            days.push(day);
        }
        Self(days)
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }
}

/// Resolve a single day name or abbreviation.
///
/// Exact names win; otherwise the first two characters are tried, so a
/// decorated label like `Montag*` still resolves to Monday.
pub fn resolve_day(token: &str) -> Option<Weekday> {
    let token = token.trim();
    if let Some((_, _, day)) = DAY_NAMES.iter().find(|(abbr, full, _)| token == *abbr || token == *full) {
        return Some(*day);
    }

    let prefix: String = token.chars().take(2).collect();
    DAY_NAMES
        .iter()
        .find(|(abbr, _, _)| prefix == *abbr)
        .map(|(_, _, day)| *day)
}

/// Parse a day token (`Mo`, `Montag`, `Mo-Fr`, `Sa – So`) into a weekday set.
///
/// Returns `None` when either endpoint is unknown or the token carries more
/// than one range separator. There is no partial result.
pub fn parse_day_range(token: &str) -> Option<WeekdaySet> {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parts = compact.split(['-', '–']);

    let start = resolve_day(parts.next()?)?;
    let Some(end) = parts.next() else {
        return Some(WeekdaySet::single(start));
    };
    let end = resolve_day(end)?;

    if parts.next().is_some() {
        return None;
    }

    Some(WeekdaySet::span(start, end))
}
