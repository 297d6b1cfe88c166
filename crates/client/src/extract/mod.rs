//! HTML adapters for the facility directory and detail pages.
//!
//! Both adapters walk a `scraper` tree and hand plain values (names, URLs,
//! caption text, table entries, text blocks) to the engine in core. Nothing
//! here decides what an opening hour means.

pub mod detail;
pub mod directory;

pub use detail::{DetailPage, parse_detail_page};
pub use directory::{DirectoryPage, MAX_PAGES, dedup_facilities, parse_directory_page};

use scraper::{ElementRef, Selector};

/// Parse a constant CSS selector.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

pub(crate) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Collapse whitespace runs to single spaces and trim.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text nodes under `element`, each trimmed, empty ones dropped, joined by `sep`.
pub(crate) fn joined_text(element: ElementRef<'_>, sep: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Whitespace-collapsed cell text, skipping text inside `span.mobileday`
/// (a weekday repeated for narrow layouts).
pub(crate) fn cell_text(cell: ElementRef<'_>) -> String {
    let text = cell
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take_while(|ancestor| *ancestor != cell)
                .any(|ancestor| ancestor.value().name() == "span" && has_class(ancestor, "mobileday"))
        })
        .filter_map(|node| node.value().as_text().map(|text| text.trim().to_string()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&text)
}

pub(crate) fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}
