use serde::{Deserialize, Serialize};

use super::defaults;

/// Time-decay scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Payload key holding the base score.
    pub base_score_key: String,
    /// Exponential decay rate per second of age.
    pub decay_rate: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            base_score_key: defaults::DEFAULT_BASE_SCORE_KEY.to_string(),
            decay_rate: defaults::DEFAULT_DECAY_RATE,
        }
    }
}
