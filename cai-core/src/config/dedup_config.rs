use serde::{Deserialize, Serialize};

use super::defaults;

/// How two records' payloads are compared during deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMode {
    /// Normalized edit similarity of the canonical payload JSON.
    #[default]
    Text,
    /// Weighted cosine similarity of encoded payload vectors.
    Vector,
}

/// Deduplication subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Maximum timestamp distance (seconds) for two records to be compared.
    pub time_threshold_secs: f64,
    /// Similarity at or above which two records are duplicates. In [0, 1].
    pub fuzzy_threshold: f64,
    /// Payload comparison strategy.
    pub similarity: SimilarityMode,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            time_threshold_secs: defaults::DEFAULT_TIME_THRESHOLD_SECS,
            fuzzy_threshold: defaults::DEFAULT_FUZZY_THRESHOLD,
            similarity: SimilarityMode::default(),
        }
    }
}
