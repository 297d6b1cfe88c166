//! Runtime settings for fetching and caching.
//!
//! Values are merged by figment. Later layers override earlier ones:
//! built-in defaults, then the TOML file named by `OPENHOURS_CONFIG_FILE`,
//! then `OPENHOURS_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::{DIRECTORY_TTL_DAYS, FACILITY_TTL_DAYS};

mod validation;

pub use validation::ConfigError;

/// Settings shared by the fetcher, the cache and the service.
///
/// Every field maps to an `OPENHOURS_<FIELD>` variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding cache records.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// User-Agent string identifying this client.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request deadline, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Largest response body accepted.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Site root used to resolve relative links and source ids.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the facility directory, relative to `base_url`.
    #[serde(default = "default_directory_path")]
    pub directory_path: String,

    /// Lifetime of the cached facility list.
    #[serde(default = "default_directory_ttl_days")]
    pub directory_ttl_days: i64,

    /// Lifetime of cached per-facility intervals.
    #[serde(default = "default_facility_ttl_days")]
    pub facility_ttl_days: i64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./openhours-cache")
}

fn default_user_agent() -> String {
    "openhours/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_base_url() -> String {
    "https://www.berlinerbaeder.de".into()
}

fn default_directory_path() -> String {
    "/baeder/".into()
}

fn default_directory_ttl_days() -> i64 {
    DIRECTORY_TTL_DAYS
}

fn default_facility_ttl_days() -> i64 {
    FACILITY_TTL_DAYS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            base_url: default_base_url(),
            directory_path: default_directory_path(),
            directory_ttl_days: default_directory_ttl_days(),
            facility_ttl_days: default_facility_ttl_days(),
        }
    }
}

fn ttl_from_days(days: i64) -> chrono::Duration {
    chrono::Duration::try_days(days).unwrap_or(chrono::Duration::MAX)
}

impl AppConfig {
    /// `timeout_ms` as a std `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Saturates at `chrono::Duration::MAX` for day counts chrono cannot
    /// represent. [`AppConfig::validate`] rejects those anyway.
    pub fn directory_ttl(&self) -> chrono::Duration {
        ttl_from_days(self.directory_ttl_days)
    }

    pub fn facility_ttl(&self) -> chrono::Duration {
        ttl_from_days(self.facility_ttl_days)
    }

    /// Merges defaults, the optional TOML file and the environment, then
    /// runs [`AppConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("OPENHOURS_CONFIG_FILE").ok();

        let layered = file
            .iter()
            .fold(Figment::from(Serialized::defaults(Self::default())), |figment, path| {
                figment.merge(Toml::file(path))
            })
            .merge(Env::prefixed("OPENHOURS_").ignore(&["CONFIG_FILE"]).map(|key| key.as_str().to_lowercase().into()));

        let config: Self = layered.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_dir, PathBuf::from("./openhours-cache"));
        assert_eq!(config.user_agent, "openhours/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.max_bytes, 5_242_880);
        assert_eq!(config.base_url, "https://www.berlinerbaeder.de");
        assert_eq!(config.directory_path, "/baeder/");
        assert_eq!(config.directory_ttl_days, 30);
        assert_eq!(config.facility_ttl_days, 7);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.directory_ttl(), chrono::Duration::days(30));
        assert_eq!(config.facility_ttl(), chrono::Duration::days(7));
    }

    #[test]
    fn test_unrepresentable_ttl_saturates() {
        let config = AppConfig { directory_ttl_days: i64::MAX / 2, ..Default::default() };
        assert_eq!(config.directory_ttl(), chrono::Duration::MAX);
    }

    #[test]
    fn test_env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("OPENHOURS_TIMEOUT_MS", "2500");
            jail.set_env("OPENHOURS_CACHE_DIR", "/tmp/openhours-test");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.timeout_ms, 2500);
            assert_eq!(config.cache_dir, PathBuf::from("/tmp/openhours-test"));
            assert_eq!(config.facility_ttl_days, 7);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_below_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("openhours.toml", "user_agent = \"from-file\"\nfacility_ttl_days = 3\n")?;
            jail.set_env("OPENHOURS_CONFIG_FILE", "openhours.toml");
            jail.set_env("OPENHOURS_FACILITY_TTL_DAYS", "5");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.user_agent, "from-file");
            assert_eq!(config.facility_ttl_days, 5);
            Ok(())
        });
    }
}
