//! Two-tier file cache for facility data.
//!
//! - Directory record: the facility list, 30-day lifetime
//! - Facility records: raw intervals per facility, 7-day lifetime
//! - Keys are SHA-256 hashes of the source identifier
//! - Freshness comes from file modification time; expired records count as
//!   absent and are never deleted eagerly

pub mod hash;
pub mod records;
pub mod store;

pub use crate::Error;

pub use hash::compute_cache_key;
pub use store::{CacheDir, DIRECTORY_TTL_DAYS, FACILITY_TTL_DAYS, is_fresh};
