//! Facility listing and schedule lookup over the two-tier cache.
//!
//! ### Directory
//! - Served from the directory record while fresh
//! - Otherwise page 1 plus every page its pagination names; a failing later
//!   page is skipped, a failing first page is an error
//!
//! ### Schedules
//! - Raw intervals served from the facility record while fresh
//! - Otherwise fetched, extracted and written back (best-effort)
//! - Projected onto the requested anchor date on every call
//! - Failures become [`ScheduleLookup::Unavailable`]

use chrono::{DateTime, NaiveDate, Utc};
use url::Url;

use openhours_core::{AppConfig, CacheDir, Error, Facility, FacilityRecord, ScheduleLookup};

use crate::extract::{dedup_facilities, parse_detail_page, parse_directory_page};
use crate::fetch::{DocumentFetcher, FetchClient, FetchConfig, canonicalize, resolve_source};

/// Opening-hours lookups for one site.
pub struct HoursService<F = FetchClient> {
    fetcher: F,
    cache: CacheDir,
    base_url: Url,
    directory_url: Url,
}

impl HoursService<FetchClient> {
    /// Build the HTTP-backed service described by `config`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let fetcher = FetchClient::new(FetchConfig::from(config))?;
        let cache = CacheDir::open(&config.cache_dir)
            .await?
            .with_ttls(config.directory_ttl(), config.facility_ttl());

        Self::new(fetcher, cache, &config.base_url, &config.directory_path)
    }
}

impl<F: DocumentFetcher> HoursService<F> {
    pub fn new(fetcher: F, cache: CacheDir, base_url: &str, directory_path: &str) -> Result<Self, Error> {
        let base_url = canonicalize(base_url)?;
        let directory_url = base_url
            .join(directory_path)
            .map_err(|e| Error::InvalidUrl(format!("directory path {directory_path}: {e}")))?;

        Ok(Self { fetcher, cache, base_url, directory_url })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn cache(&self) -> &CacheDir {
        &self.cache
    }

    pub async fn list_facilities(&self) -> Result<Vec<Facility>, Error> {
        self.list_facilities_at(Utc::now()).await
    }

    /// All facilities, with cache freshness judged at `now`.
    pub async fn list_facilities_at(&self, now: DateTime<Utc>) -> Result<Vec<Facility>, Error> {
        if let Some(facilities) = self.cache.get_directory(now).await {
            tracing::debug!(count = facilities.len(), "directory cache hit");
            return Ok(facilities);
        }

        let facilities = self.scrape_directory().await?;

        if let Err(e) = self.cache.put_directory(&facilities).await {
            tracing::warn!(error = %e, "failed to cache directory");
        }

        Ok(facilities)
    }

    /// Facilities whose name contains `query`, ignoring case.
    pub async fn find_facilities(&self, query: &str) -> Result<Vec<Facility>, Error> {
        let facilities = self.list_facilities().await?;
        Ok(facilities.into_iter().filter(|f| f.matches(query)).collect())
    }

    pub async fn get_schedule(&self, source_id: &str, today: NaiveDate) -> ScheduleLookup {
        self.get_schedule_at(source_id, today, Utc::now()).await
    }

    /// Seven-day schedule starting at `today`, with cache freshness judged
    /// at `now`. Never fails: problems are reported as `Unavailable`.
    pub async fn get_schedule_at(&self, source_id: &str, today: NaiveDate, now: DateTime<Utc>) -> ScheduleLookup {
        match self.facility_record(source_id, now).await {
            Ok((url, record)) => ScheduleLookup::Available {
                name: record.name,
                source_id: url.to_string(),
                schedule: record.intervals.project(today),
            },
            Err(e) => {
                if e.is_unavailable() {
                    tracing::warn!(source_id, error = %e, "schedule unavailable");
                } else {
                    tracing::debug!(source_id, error = %e, "schedule request rejected");
                }
                ScheduleLookup::Unavailable { source_id: source_id.trim().to_string(), reason: e.to_string() }
            }
        }
    }

    async fn facility_record(&self, source_id: &str, now: DateTime<Utc>) -> Result<(Url, FacilityRecord), Error> {
        if source_id.trim().is_empty() {
            return Err(Error::InvalidInput("source_id must not be empty".into()));
        }

        let url = resolve_source(&self.base_url, source_id)?;

        if let Some(record) = self.cache.get_facility(url.as_str(), now).await {
            tracing::debug!(%url, "facility cache hit");
            return Ok((url, record));
        }

        let response = self.fetcher.fetch(&url).await?;
        let page = parse_detail_page(&response.text(), &url)?;
        let record = FacilityRecord { name: page.name, intervals: page.intervals };

        if let Err(e) = self.cache.put_facility(url.as_str(), &record).await {
            tracing::warn!(%url, error = %e, "failed to cache facility");
        }

        Ok((url, record))
    }

    async fn scrape_directory(&self) -> Result<Vec<Facility>, Error> {
        let first = self.fetcher.fetch(&self.directory_url).await?;
        let page = parse_directory_page(&first.text(), &first.final_url);

        let mut facilities = page.facilities;

        for number in page.pages.into_iter().filter(|&n| n > 1) {
            let url = self
                .directory_url
                .join(&format!("page/{number}/"))
                .map_err(|e| Error::InvalidUrl(e.to_string()))?;

            match self.fetcher.fetch(&url).await {
                Ok(response) => {
                    facilities.extend(parse_directory_page(&response.text(), &response.final_url).facilities);
                }
                Err(e) => tracing::warn!(page = number, error = %e, "skipping directory page"),
            }
        }

        let facilities = dedup_facilities(facilities);
        if facilities.is_empty() {
            return Err(Error::ParseFailed(format!("no facilities listed at {}", self.directory_url)));
        }

        tracing::info!(count = facilities.len(), "directory scraped");
        Ok(facilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchResponse;
    use crate::fixtures;
    use bytes::Bytes;
    use chrono::Duration;
    use openhours_core::DayHours;
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "https://www.berlinerbaeder.de";
    const MITTE: &str = "https://www.berlinerbaeder.de/baeder/detail/stadtbad-mitte/";

    /// Serves fixture pages by URL, 404 for anything else.
    struct StubFetcher {
        pages: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            let pages = pages.iter().map(|(url, html)| (url.to_string(), html.to_string())).collect();
            Self { pages, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl DocumentFetcher for StubFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let html = self
                .pages
                .get(url.as_str())
                .ok_or_else(|| Error::HttpStatus(format!("status 404 for {url}")))?;

            Ok(FetchResponse {
                url: url.clone(),
                final_url: url.clone(),
                status: StatusCode::OK,
                content_type: Some("text/html; charset=utf-8".into()),
                bytes: Bytes::from(html.clone()),
                fetch_ms: 0,
            })
        }
    }

    async fn service(pages: &[(&str, &str)]) -> (tempfile::TempDir, HoursService<StubFetcher>) {
        let tmp = tempfile::tempdir().unwrap();
        let cache = CacheDir::open(tmp.path()).await.unwrap();
        let service = HoursService::new(StubFetcher::new(pages), cache, BASE, "/baeder/").unwrap();
        (tmp, service)
    }

    fn directory_pages() -> Vec<(&'static str, &'static str)> {
        vec![
            ("https://www.berlinerbaeder.de/baeder/", fixtures::DIRECTORY_PAGE_1),
            ("https://www.berlinerbaeder.de/baeder/page/2/", fixtures::DIRECTORY_PAGE_2),
        ]
    }

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 6).unwrap()
    }

    fn open(hours: &str) -> DayHours {
        DayHours::Open(hours.to_string())
    }

    #[tokio::test]
    async fn test_directory_pagination_dedup_and_cache() {
        let (_tmp, service) = service(&directory_pages()).await;

        let facilities = service.list_facilities().await.unwrap();
        let names: Vec<_> = facilities.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Stadtbad Mitte", "Kombibad Seestraße", "Schwimmhalle Fischerinsel"]);
        assert_eq!(facilities[0].source_id, MITTE);
        // pages 1 and 2 plus page 3 from "1 von 3", which is missing
        assert_eq!(service.fetcher().calls(), 3);

        let cached = service.list_facilities().await.unwrap();
        assert_eq!(cached, facilities);
        assert_eq!(service.fetcher().calls(), 3);
    }

    #[tokio::test]
    async fn test_directory_expires_after_ttl() {
        let (_tmp, service) = service(&directory_pages()).await;
        service.list_facilities().await.unwrap();
        assert_eq!(service.fetcher().calls(), 3);

        service.list_facilities_at(Utc::now() + Duration::days(29)).await.unwrap();
        assert_eq!(service.fetcher().calls(), 3);

        service.list_facilities_at(Utc::now() + Duration::days(31)).await.unwrap();
        assert_eq!(service.fetcher().calls(), 6);
    }

    #[tokio::test]
    async fn test_directory_first_page_failure_is_error() {
        let (_tmp, service) = service(&[]).await;
        let result = service.list_facilities().await;
        assert!(matches!(result, Err(Error::HttpStatus(_))));
    }

    #[tokio::test]
    async fn test_empty_directory_is_error_and_not_cached() {
        let empty = [("https://www.berlinerbaeder.de/baeder/", "<html><body></body></html>")];
        let (_tmp, service) = service(&empty).await;

        assert!(matches!(service.list_facilities().await, Err(Error::ParseFailed(_))));
        assert!(service.cache().get_directory(Utc::now()).await.is_none());
    }

    #[tokio::test]
    async fn test_find_facilities() {
        let (_tmp, service) = service(&directory_pages()).await;

        let found = service.find_facilities("BAD").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(service.find_facilities("Wannsee").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_tabular_end_to_end() {
        let (_tmp, service) = service(&[(MITTE, fixtures::TABULAR_DETAIL)]).await;

        let lookup = service.get_schedule("/baeder/detail/stadtbad-mitte/", sunday()).await;
        let ScheduleLookup::Available { name, source_id, schedule } = lookup else {
            panic!("expected available schedule");
        };

        assert_eq!(name, "Stadtbad Mitte");
        assert_eq!(source_id, MITTE);
        assert_eq!(schedule.days.len(), 7);
        assert_eq!(schedule.days[0].label(), "2024-10-06 (Sun)");
        assert_eq!(schedule.days[1].hours, open("10:00 - 14:00 Uhr"));
        assert_eq!(schedule.days[2].hours, open("15:00 - 22:00 Uhr"));
        assert_eq!(schedule.days[3].hours.to_string(), "Geschlossen");
    }

    #[tokio::test]
    async fn test_schedule_free_text_end_to_end() {
        let (_tmp, service) = service(&[(MITTE, fixtures::FREE_TEXT_DETAIL)]).await;

        let lookup = service.get_schedule(MITTE, sunday()).await;
        let schedule = lookup.schedule().unwrap();

        assert_eq!(schedule.days[0].hours, DayHours::Closed);
        assert_eq!(schedule.days[1].hours, open("06:00 - 21:00"));
        assert_eq!(schedule.days[5].hours, open("06:00 - 21:00"));
        assert_eq!(schedule.days[6].hours, open("07:00 - 19:00"));
    }

    #[tokio::test]
    async fn test_weekday_line_fallback_end_to_end() {
        let (_tmp, service) = service(&[(MITTE, fixtures::WEEKDAY_LINES_DETAIL)]).await;

        let lookup = service.get_schedule(MITTE, sunday()).await;
        assert_eq!(lookup.schedule().unwrap().days[0].hours, open("09:00 - 18:00"));
    }

    #[tokio::test]
    async fn test_unreachable_page_is_unavailable() {
        let (_tmp, service) = service(&[]).await;

        let lookup = service.get_schedule(MITTE, sunday()).await;
        let ScheduleLookup::Unavailable { source_id, reason } = lookup else {
            panic!("expected unavailable lookup");
        };
        assert_eq!(source_id, MITTE);
        assert!(reason.starts_with("HTTP_ERROR"));
    }

    #[tokio::test]
    async fn test_school_only_table_is_available_and_closed() {
        let (_tmp, service) = service(&[(MITTE, fixtures::SCHOOL_ONLY_DETAIL)]).await;

        let lookup = service.get_schedule(MITTE, sunday()).await;
        assert!(lookup.is_available());
        assert!(lookup.schedule().unwrap().is_closed_all_week());
    }

    #[tokio::test]
    async fn test_page_without_hours_is_unavailable_and_not_cached() {
        let (_tmp, service) = service(&[(MITTE, fixtures::NO_HOURS_DETAIL)]).await;

        let lookup = service.get_schedule(MITTE, sunday()).await;
        let ScheduleLookup::Unavailable { reason, .. } = lookup else {
            panic!("expected unavailable lookup");
        };
        assert!(reason.starts_with("PARSE_FAILED"));

        service.get_schedule(MITTE, sunday()).await;
        assert_eq!(service.fetcher().calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_source_id_is_invalid_input() {
        let (_tmp, service) = service(&[]).await;

        let lookup = service.get_schedule("   ", sunday()).await;
        let ScheduleLookup::Unavailable { reason, .. } = lookup else {
            panic!("expected unavailable lookup");
        };
        assert!(reason.starts_with("INVALID_INPUT"));
        assert_eq!(service.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_foreign_source_is_never_fetched() {
        const DAEMON: &str = "http://127.0.0.1:2375/containers/json";
        let (_tmp, service) = service(&[(DAEMON, fixtures::FREE_TEXT_DETAIL)]).await;

        let lookup = service.get_schedule(DAEMON, sunday()).await;
        let ScheduleLookup::Unavailable { reason, .. } = lookup else {
            panic!("expected unavailable lookup");
        };
        assert!(reason.starts_with("INVALID_URL"));
        assert_eq!(service.fetcher().calls(), 0);
    }

    #[tokio::test]
    async fn test_facility_cache_write_failure_still_returns_schedule() {
        let (tmp, service) = service(&[(MITTE, fixtures::FREE_TEXT_DETAIL)]).await;
        std::fs::remove_dir_all(tmp.path()).unwrap();

        let lookup = service.get_schedule(MITTE, sunday()).await;
        assert!(lookup.is_available());
        assert_eq!(lookup.schedule().unwrap().days[1].hours, open("06:00 - 21:00"));

        service.get_schedule(MITTE, sunday()).await;
        assert_eq!(service.fetcher().calls(), 2);
    }

    #[tokio::test]
    async fn test_directory_cache_write_failure_still_returns_list() {
        let (tmp, service) = service(&directory_pages()).await;
        std::fs::remove_dir_all(tmp.path()).unwrap();

        let facilities = service.list_facilities().await.unwrap();
        assert_eq!(facilities.len(), 3);
        assert!(service.cache().get_directory(Utc::now()).await.is_none());
    }

    #[tokio::test]
    async fn test_facility_cache_hit_and_refetch() {
        let (_tmp, service) = service(&[(MITTE, fixtures::FREE_TEXT_DETAIL)]).await;

        service.get_schedule(MITTE, sunday()).await;
        service.get_schedule_at(MITTE, sunday(), Utc::now() + Duration::days(6) + Duration::hours(23)).await;
        assert_eq!(service.fetcher().calls(), 1);

        let later = sunday() + Duration::days(7);
        let expired = Utc::now() + Duration::days(7) + Duration::hours(1);
        let lookup = service.get_schedule_at(MITTE, later, expired).await;
        assert_eq!(service.fetcher().calls(), 2);
        assert_eq!(lookup.schedule().unwrap().days[0].date, later);
    }

    #[tokio::test]
    async fn test_cached_intervals_projected_on_new_anchor() {
        let (_tmp, service) = service(&[(MITTE, fixtures::FREE_TEXT_DETAIL)]).await;

        service.get_schedule(MITTE, sunday()).await;
        let monday = sunday() + Duration::days(1);
        let lookup = service.get_schedule(MITTE, monday).await;

        assert_eq!(service.fetcher().calls(), 1);
        assert_eq!(lookup.schedule().unwrap().days[0].hours, open("06:00 - 21:00"));
    }

    #[tokio::test]
    async fn test_relative_and_absolute_ids_share_record() {
        let (_tmp, service) = service(&[(MITTE, fixtures::FREE_TEXT_DETAIL)]).await;

        service.get_schedule("/baeder/detail/stadtbad-mitte/", sunday()).await;
        service.get_schedule("https://WWW.berlinerbaeder.de/baeder/detail/stadtbad-mitte/#zeiten", sunday()).await;

        assert_eq!(service.fetcher().calls(), 1);
    }
}
