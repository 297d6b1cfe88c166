//! Directory and per-facility records.
//!
//! The directory record holds the full facility list. Each facility record
//! holds that facility's raw intervals, keyed by its source URL.

use chrono::{DateTime, Utc};

use super::hash::{DIRECTORY_SOURCE, compute_cache_key};
use super::store::CacheDir;
use crate::Error;
use crate::facility::{Facility, FacilityRecord};

impl CacheDir {
    /// Cached facility list, if fresh at `now`.
    pub async fn get_directory(&self, now: DateTime<Utc>) -> Option<Vec<Facility>> {
        self.read_fresh(&compute_cache_key(DIRECTORY_SOURCE), self.directory_ttl, now)
            .await
    }

    pub async fn put_directory(&self, facilities: &[Facility]) -> Result<(), Error> {
        self.write_record(&compute_cache_key(DIRECTORY_SOURCE), &facilities)
            .await
    }

    /// Cached record for `source_id`, if fresh at `now`.
    pub async fn get_facility(&self, source_id: &str, now: DateTime<Utc>) -> Option<FacilityRecord> {
        self.read_fresh(&compute_cache_key(source_id), self.facility_ttl, now)
            .await
    }

    pub async fn put_facility(&self, source_id: &str, record: &FacilityRecord) -> Result<(), Error> {
        self.write_record(&compute_cache_key(source_id), record).await
    }
}
