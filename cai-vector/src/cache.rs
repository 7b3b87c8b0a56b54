//! In-memory encoding cache using moka.
//!
//! Keys are blake3 hashes of the canonical payload JSON, so two payloads that
//! differ only in key order share an entry.

use std::time::Duration;

use moka::sync::Cache;

use cai_core::errors::EncodeError;
use cai_core::models::Payload;

use crate::encoder::ContextEncoder;

/// Memoizes payload encodings. Failed encodings are not cached.
pub struct EncodingCache {
    cache: Cache<String, Vec<f64>>,
}

impl EncodingCache {
    /// Create a cache holding at most `max_entries` encodings.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();

        Self { cache }
    }

    /// Content hash of a payload.
    pub fn content_hash(payload: &Payload) -> String {
        let canonical = serde_json::to_string(payload).unwrap_or_default();
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }

    /// Return the cached encoding, encoding and caching on a miss.
    pub fn get_or_encode(
        &self,
        encoder: &ContextEncoder,
        payload: &Payload,
    ) -> Result<Vec<f64>, EncodeError> {
        let key = Self::content_hash(payload);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let encoded = encoder.encode(payload)?;
        self.cache.insert(key, encoded.clone());
        Ok(encoded)
    }

    pub fn get(&self, payload: &Payload) -> Option<Vec<f64>> {
        self.cache.get(&Self::content_hash(payload))
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
