//! Client code for openhours.
//!
//! This crate provides the HTTP fetch pipeline, the HTML adapters for the
//! facility directory and detail pages, and the cached lookup service shared
//! by the server.

pub mod extract;
pub mod fetch;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extract::{DetailPage, DirectoryPage, parse_detail_page, parse_directory_page};
pub use fetch::{DocumentFetcher, FetchClient, FetchConfig, FetchResponse};
pub use service::HoursService;
