//! Facility directory pages.
//!
//! ### Entries
//! - `div.bathlist_item` with `a.list_title_link` (fallback `a.bathlist_item_image_link`)
//! - Pages without list entries: every anchor linking to `/baeder/detail/`
//!
//! ### Pagination
//! - Page links matching `/page/N/` inside `ul.pagination`
//! - Mobile indicator `1 von N`, meaning pages `1..=N`

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

use openhours_core::Facility;

use super::{collapse_whitespace, selector};
use crate::fetch::{last_path_segment, resolve_href};

/// Upper bound on directory pages fetched for one listing.
pub const MAX_PAGES: u32 = 50;

/// Path fragment of facility detail links.
const DETAIL_PATH: &str = "/baeder/detail/";

static PAGE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/page/(\d+)/").expect("invalid page link pattern"));

static PAGE_TOTAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"von\s*(\d+)").expect("invalid page total pattern"));

/// What one directory page yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPage {
    /// Facilities in document order, duplicates kept.
    pub facilities: Vec<Facility>,
    /// Every page number the pagination mentions, always including 1.
    pub pages: BTreeSet<u32>,
}

/// Parse one directory page fetched from `page_url`.
pub fn parse_directory_page(html: &str, page_url: &Url) -> DirectoryPage {
    let document = Html::parse_document(html);

    let mut facilities = list_entries(&document, page_url);
    if facilities.is_empty() {
        facilities = detail_anchors(&document, page_url);
    }

    DirectoryPage { facilities, pages: page_numbers(&document) }
}

/// Keep the first facility per source id, preserving order.
pub fn dedup_facilities(facilities: impl IntoIterator<Item = Facility>) -> Vec<Facility> {
    let mut seen = HashSet::new();
    facilities
        .into_iter()
        .filter(|f| seen.insert(f.source_id.clone()))
        .collect()
}

fn list_entries(document: &Html, page_url: &Url) -> Vec<Facility> {
    let items = selector("div.bathlist_item");
    let title_link = selector("a.list_title_link");
    let image_link = selector("a.bathlist_item_image_link");

    document
        .select(&items)
        .filter_map(|item| {
            let link = item
                .select(&title_link)
                .next()
                .or_else(|| item.select(&image_link).next())?;
            facility_from_link(link, page_url)
        })
        .collect()
}

fn detail_anchors(document: &Html, page_url: &Url) -> Vec<Facility> {
    let anchors = selector("a[href]");

    document
        .select(&anchors)
        .filter(|a| a.value().attr("href").is_some_and(|href| href.contains(DETAIL_PATH)))
        .filter_map(|a| facility_from_link(a, page_url))
        .collect()
}

fn facility_from_link(link: ElementRef<'_>, page_url: &Url) -> Option<Facility> {
    let href = link.value().attr("href")?;
    let url = match resolve_href(page_url, href) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(href, error = %e, "skipping unresolvable facility link");
            return None;
        }
    };

    let text = collapse_whitespace(&link.text().collect::<String>());
    let name = if !text.is_empty() {
        text
    } else if let Some(title) = link.value().attr("title").map(collapse_whitespace).filter(|t| !t.is_empty()) {
        title
    } else {
        last_path_segment(&url)?
    };

    Some(Facility::new(name, url.to_string()))
}

fn page_numbers(document: &Html) -> BTreeSet<u32> {
    let links = selector("ul.pagination a[href]");
    let mobile = selector("ul.pagination li.mobile span");

    let mut pages = BTreeSet::from([1]);

    for a in document.select(&links) {
        if let Some(caps) = a.value().attr("href").and_then(|href| PAGE_LINK.captures(href))
            && let Ok(page) = caps[1].parse::<u32>()
        {
            pages.insert(page);
        }
    }

    if let Some(span) = document.select(&mobile).next() {
        let text = span.text().collect::<String>();
        if let Some(caps) = PAGE_TOTAL.captures(&text)
            && let Ok(total) = caps[1].parse::<u32>()
        {
            pages.extend(1..=total.min(MAX_PAGES));
        }
    }

    pages.retain(|&page| (1..=MAX_PAGES).contains(&page));
    pages
}
