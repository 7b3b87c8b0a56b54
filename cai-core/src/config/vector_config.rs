use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector encoding/comparison configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Per-dimension comparison weights. Length must match the encoder output.
    pub weights: Vec<f64>,
    /// Maximum number of cached payload encodings.
    pub cache_capacity: u64,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            weights: defaults::DEFAULT_VECTOR_WEIGHTS.to_vec(),
            cache_capacity: defaults::DEFAULT_ENCODING_CACHE_CAPACITY,
        }
    }
}
