//! Content-addressed cache key generation.

use sha2::{Digest, Sha256};

/// Source identifier hashed for the directory record.
pub const DIRECTORY_SOURCE: &str = "directory";

/// Compute the cache key for a source identifier.
pub fn compute_cache_key(source_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_id.as_bytes());
    hex::encode(hasher.finalize())
}
