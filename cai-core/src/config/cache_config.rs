use serde::{Deserialize, Serialize};

/// Context cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL applied when an update does not pass one. `None` means non-expiring.
    pub default_ttl_secs: Option<u64>,
}
