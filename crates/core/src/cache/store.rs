//! File-backed record store.
//!
//! Each record is one JSON file named after its cache key under the cache
//! root. A record's write time is the file's modification time, so there is
//! no timestamp inside the payload. Stale records are left in place and
//! overwritten by the next successful refresh.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;

/// Per-process sequence for temp file names.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Default lifetime of the directory record.
pub const DIRECTORY_TTL_DAYS: i64 = 30;

/// Default lifetime of a per-facility record.
pub const FACILITY_TTL_DAYS: i64 = 7;

/// Whether a record written at `written_at` is still usable at `now`.
///
/// A record is fresh while `now - written_at <= ttl`. Write times in the
/// future (clock skew) count as fresh.
pub fn is_fresh(written_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    now - written_at <= ttl
}

/// Cache directory handle.
#[derive(Clone, Debug)]
pub struct CacheDir {
    root: PathBuf,
    pub(crate) directory_ttl: Duration,
    pub(crate) facility_ttl: Duration,
}

impl CacheDir {
    /// Open a cache rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;

        Ok(Self {
            root,
            directory_ttl: Duration::days(DIRECTORY_TTL_DAYS),
            facility_ttl: Duration::days(FACILITY_TTL_DAYS),
        })
    }

    /// Override the default record lifetimes.
    pub fn with_ttls(mut self, directory_ttl: Duration, facility_ttl: Duration) -> Self {
        self.directory_ttl = directory_ttl;
        self.facility_ttl = facility_ttl;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read a record if it exists and is fresh at `now`.
    ///
    /// Any I/O or decode failure is logged and reported as a miss.
    pub(crate) async fn read_fresh<T: DeserializeOwned>(
        &self, key: &str, ttl: Duration, now: DateTime<Utc>,
    ) -> Option<T> {
        match self.read_record(key, ttl, now).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(key, error = %e, "unreadable cache record, treating as miss");
                None
            }
        }
    }

    async fn read_record<T: DeserializeOwned>(
        &self, key: &str, ttl: Duration, now: DateTime<Utc>,
    ) -> Result<Option<T>, Error> {
        let path = self.record_path(key);

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let written_at: DateTime<Utc> = metadata.modified()?.into();
        if !is_fresh(written_at, now, ttl) {
            tracing::debug!(key, %written_at, "cache record expired");
            return Ok(None);
        }

        let bytes = tokio::fs::read(&path).await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Replace a record as a whole: write a temp file, then rename over the
    /// old one. Every write gets its own temp file, so concurrent writers of
    /// the same key end with the last rename.
    pub(crate) async fn write_record<T: Serialize>(&self, key: &str, payload: &T) -> Result<(), Error> {
        let bytes = serde_json::to_vec(payload)?;
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self.root.join(format!("{key}.{}.{seq}.tmp", std::process::id()));

        if let Err(e) = tokio::fs::write(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        tokio::fs::rename(&tmp, self.record_path(key)).await?;

        tracing::debug!(key, bytes = bytes.len(), "cache record written");
        Ok(())
    }
}
