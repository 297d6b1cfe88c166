//! Free-text extraction of `<day-range>: <hours>` lines.

use std::sync::LazyLock;

use regex::Regex;

use super::FreeTextInterval;
use crate::days::{DAY_ABBREVIATIONS, parse_day_range};

const DAY: &str = r"(?:Mo(?:ntag)?|Di(?:enstag)?|Mi(?:ttwoch)?|Do(?:nnerstag)?|Fr(?:eitag)?|Sa(?:mstag)?|So(?:nntag)?)";

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({DAY}(?:\s*[-–]\s*{DAY})?)\s*[:\-]\s*(.+)")).expect("invalid line pattern")
});

/// Extract one interval per matching line, in line order.
///
/// Lines that don't start with a day token followed by `:` or `-` are
/// ignored, as are lines whose day part doesn't resolve.
pub fn extract_text(text: &str) -> Vec<FreeTextInterval> {
    text.lines()
        .filter_map(|line| {
            let caps = LINE_PATTERN.captures(line.trim())?;
            let weekdays = parse_day_range(&caps[1])?;
            let hours = caps[2].trim();
            (!hours.is_empty()).then(|| FreeTextInterval { weekdays, hours: hours.to_string() })
        })
        .collect()
}

/// Keep only lines mentioning a weekday abbreviation anywhere.
///
/// Best-effort input for [`extract_text`] when a page has no recognizable
/// opening-hours section. Any unrelated line naming a day gets through.
pub fn weekday_lines(text: &str) -> String {
    text.lines()
        .filter(|line| DAY_ABBREVIATIONS.iter().any(|abbr| line.contains(abbr)))
        .collect::<Vec<_>>()
        .join("\n")
}
