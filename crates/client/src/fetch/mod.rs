//! Page fetching behind the [`DocumentFetcher`] seam.
//!
//! The HTTP implementation sends an identifying User-Agent and enforces:
//! - a per-request timeout (`timeout_ms`, 10s by default)
//! - at most 5 redirects
//! - a body cap (`max_bytes`, 5MB by default), checked against the
//!   announced length and again against the bytes received
//!
//! Any non-2xx status is an error.

pub mod url;

use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::{Client, StatusCode, Url, header, redirect};

pub use url::{UrlError, canonicalize, last_path_segment, resolve_href, resolve_source};

use openhours_core::{AppConfig, Error};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.5";

/// Limits and identity for [`FetchClient`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Largest accepted body.
    pub max_bytes: usize,
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: 5,
        }
    }
}

/// A fetched page.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// URL as requested.
    pub url: Url,
    /// URL after redirects.
    pub final_url: Url,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub fetch_ms: u64,
}

impl FetchResponse {
    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Source of raw documents.
///
/// [`FetchClient`] is the HTTP implementation; tests serve fixture pages
/// through the same trait.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error>;
}

/// reqwest-backed [`DocumentFetcher`].
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::FetchFailed(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn check_size(&self, len: usize, url: &Url) -> Result<(), Error> {
        if len > self.config.max_bytes {
            return Err(Error::FetchTooLarge(format!(
                "{url}: {len} bytes, limit {}",
                self.config.max_bytes
            )));
        }
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(err.to_string())
    } else {
        Error::FetchFailed(err.to_string())
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for FetchClient {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse, Error> {
        let started = Instant::now();

        let response = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(format!("{url} answered {}", status.as_u16())));
        }

        if let Some(announced) = response.content_length() {
            self.check_size(usize::try_from(announced).unwrap_or(usize::MAX), url)?;
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(transport_error)?;
        self.check_size(bytes.len(), url)?;

        let fetch_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::debug!(%url, %final_url, fetch_ms, bytes = bytes.len(), "page fetched");

        Ok(FetchResponse { url: url.clone(), final_url, status, content_type, bytes, fetch_ms })
    }
}
