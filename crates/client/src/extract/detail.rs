//! Facility detail pages.
//!
//! A page is tabular when at least one `table.openingtime` in scope has a
//! caption with a validity range. Otherwise the text after an
//! `Öffnungszeiten` heading is read line by line, and failing that every
//! line of the page naming a weekday.

use scraper::{ElementRef, Html};
use url::Url;

use openhours_core::intervals::{TableCell, TableEntry, extract_table, extract_text, weekday_lines};
use openhours_core::{Error, IntervalSet};

use super::{cell_text, collapse_whitespace, joined_text, next_element_sibling, selector};
use crate::fetch::last_path_segment;

/// Heading text that introduces a free-text opening-hours block.
const HOURS_HEADING: &str = "Öffnungszeiten";

/// Name and raw intervals of one facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub name: String,
    pub intervals: IntervalSet,
}

/// Parse a detail page fetched from `url`.
///
/// Errors with `ParseFailed` when the page has no dated table, no
/// opening-hours heading, and no weekday line that yields an interval.
pub fn parse_detail_page(html: &str, url: &Url) -> Result<DetailPage, Error> {
    let document = Html::parse_document(html);
    let name = facility_name(&document, url);

    if let Some(intervals) = tabular_intervals(&document) {
        tracing::debug!(%url, count = intervals.len(), "tabular opening hours");
        return Ok(DetailPage { name, intervals: IntervalSet::Table(intervals) });
    }

    let section = heading_section(&document);
    let text = match section.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => weekday_lines(&joined_text(document.root_element(), "\n")),
    };
    let intervals = extract_text(&text);

    if section.is_none() && intervals.is_empty() {
        return Err(Error::ParseFailed(format!("no opening hours found on {url}")));
    }

    tracing::debug!(%url, count = intervals.len(), "free-text opening hours");
    Ok(DetailPage { name, intervals: IntervalSet::FreeText(intervals) })
}

fn facility_name(document: &Html, url: &Url) -> String {
    document
        .select(&selector("h1"))
        .next()
        .map(|h1| collapse_whitespace(&h1.text().collect::<String>()))
        .filter(|name| !name.is_empty())
        .or_else(|| last_path_segment(url))
        .unwrap_or_else(|| url.to_string())
}

/// Where opening-time tables are searched: the active tab pane, the
/// indoor-pool area, or the whole page.
fn table_scope(document: &Html) -> ElementRef<'_> {
    let active = selector("div.facilitytimes div.tab-content.tableareas div.tab-pane.show.active[id]");
    let indoor = selector("div#area-4");

    document
        .select(&active)
        .next()
        .or_else(|| document.select(&indoor).next())
        .unwrap_or_else(|| document.root_element())
}

/// Intervals from every valid table in scope, or `None` when no table has a
/// usable caption.
fn tabular_intervals(document: &Html) -> Option<Vec<openhours_core::DatedInterval>> {
    let tables = selector("table.openingtime");
    let captions = selector("caption");
    let tbody = selector("tbody");

    let mut found = false;
    let mut intervals = Vec::new();

    for table in table_scope(document).select(&tables) {
        let Some(caption) = table.select(&captions).next() else {
            tracing::warn!("opening-time table without caption, skipping");
            continue;
        };
        let caption = joined_text(caption, " ");

        let body = table.select(&tbody).next().unwrap_or(table);
        match extract_table(&caption, &body_entries(body)) {
            Ok(mut table_intervals) => {
                found = true;
                intervals.append(&mut table_intervals);
            }
            Err(e) => tracing::warn!(caption = %caption, error = %e, "skipping opening-time table"),
        }
    }

    found.then_some(intervals)
}

/// Direct `tr`/`td` children of a table body in document order.
fn body_entries(body: ElementRef<'_>) -> Vec<TableEntry> {
    let th = selector("th");
    let td = selector("td");

    body.children()
        .filter_map(ElementRef::wrap)
        .filter_map(|child| match child.value().name() {
            "tr" => {
                let label = child.select(&th).next().map(|th| joined_text(th, ""));
                let cell = child.select(&td).next().map(table_cell);
                Some(TableEntry::Row { label, cell })
            }
            "td" => Some(TableEntry::Cell(table_cell(child))),
            _ => None,
        })
        .collect()
}

fn table_cell(td: ElementRef<'_>) -> TableCell {
    let cell = TableCell::new(cell_text(td));
    match td.value().attr("title") {
        Some(title) => cell.with_title(title),
        None => cell,
    }
}

/// Text of the first element after an `h2`/`h3` mentioning opening hours.
///
/// `Some("")` when the heading exists but nothing useful follows it.
fn heading_section(document: &Html) -> Option<String> {
    let headings = selector("h2, h3");

    let heading = document
        .select(&headings)
        .find(|h| h.text().collect::<String>().contains(HOURS_HEADING))?;

    Some(next_element_sibling(heading).map(|sibling| joined_text(sibling, "\n")).unwrap_or_default())
}
