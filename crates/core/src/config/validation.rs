//! Bounds checks run on a freshly loaded `AppConfig`.

use crate::config::AppConfig;
use thiserror::Error;

const MAX_BODY_LIMIT: usize = 50 * 1024 * 1024;
const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<u64> = 100..=300_000;
const TTL_RANGE_DAYS: std::ops::RangeInclusive<i64> = 1..=3650;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider could not be read or a value had the wrong type.
    #[error("configuration could not be loaded: {0}")]
    LoadFailed(String),

    #[error("configuration field `{field}` rejected: {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.to_string(), reason: reason.into() }
}

impl AppConfig {
    /// Rejects values the fetcher or cache cannot work with.
    ///
    /// Checked, in order: body limit (1 byte to 50MB), timeout (100ms to
    /// 5 minutes), a non-blank user agent, an absolute http(s) `base_url`,
    /// and TTLs between one day and ten years.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 || self.max_bytes > MAX_BODY_LIMIT {
            return Err(invalid("max_bytes", format!("{} is outside 1..={MAX_BODY_LIMIT}", self.max_bytes)));
        }

        if !TIMEOUT_RANGE_MS.contains(&self.timeout_ms) {
            return Err(invalid(
                "timeout_ms",
                format!("{} is outside {}..={}", self.timeout_ms, TIMEOUT_RANGE_MS.start(), TIMEOUT_RANGE_MS.end()),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(invalid("user_agent", "blank"));
        }

        let base = url::Url::parse(&self.base_url).map_err(|e| invalid("base_url", e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("base_url", format!("scheme `{}` is not http(s)", base.scheme())));
        }

        let ttls = [("directory_ttl_days", self.directory_ttl_days), ("facility_ttl_days", self.facility_ttl_days)];
        for (field, days) in ttls {
            if !TTL_RANGE_DAYS.contains(&days) {
                return Err(invalid(
                    field,
                    format!("{days} days is outside {}..={}", TTL_RANGE_DAYS.start(), TTL_RANGE_DAYS.end()),
                ));
            }
        }

        if self.facility_ttl_days > self.directory_ttl_days {
            tracing::warn!(
                directory_ttl_days = self.directory_ttl_days,
                facility_ttl_days = self.facility_ttl_days,
                "facility records outlive the directory record"
            );
        }

        Ok(())
    }
}
