//! Turning page links and caller-supplied ids into the URLs used as cache keys.

/// Why a link or id could not become a fetchable URL.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("only http(s) is fetched, got `{0}`")]
    UnsupportedScheme(String),

    #[error("malformed URL: {0}")]
    InvalidUrl(String),

    #[error("{url} is outside {site}")]
    ForeignSite { url: String, site: String },
}

impl From<UrlError> for openhours_core::Error {
    fn from(err: UrlError) -> Self {
        openhours_core::Error::InvalidUrl(err.to_string())
    }
}

/// Parses `input` as an absolute http(s) URL, assuming `https://` when no
/// scheme is given. The host comes out lowercased and the fragment is
/// stripped. The query is left as written.
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = if input.contains("://") {
        url::Url::parse(input)
    } else {
        url::Url::parse(&format!("https://{input}"))
    };
    let mut url = parsed.map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    url.set_fragment(None);
    Ok(url)
}

/// Resolve a link found on a page against that page's URL.
pub fn resolve_href(page: &url::Url, href: &str) -> Result<url::Url, UrlError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    let joined = page.join(href).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    canonicalize(joined.as_str())
}

/// Resolve a caller-supplied source id.
///
/// Site-relative ids (`/baeder/detail/x/`) are joined onto `base`, anything
/// else is canonicalized as an absolute URL. Both spellings of the same page
/// end up with the same cache key. The result must share `base`'s origin
/// (scheme, host and port).
pub fn resolve_source(base: &url::Url, source_id: &str) -> Result<url::Url, UrlError> {
    let trimmed = source_id.trim();
    let url = if trimmed.starts_with('/') { resolve_href(base, trimmed)? } else { canonicalize(trimmed)? };

    if url.origin() != base.origin() {
        return Err(UrlError::ForeignSite { url: url.to_string(), site: base.origin().ascii_serialization() });
    }
    Ok(url)
}

/// Last non-empty path segment, e.g. `stadtbad-mitte` for `/baeder/detail/stadtbad-mitte/`.
pub fn last_path_segment(url: &url::Url) -> Option<String> {
    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}
