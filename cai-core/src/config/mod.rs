//! Engine configuration, loaded from TOML with per-section defaults.

pub mod cache_config;
pub mod categorizer_config;
pub mod decay_config;
pub mod dedup_config;
pub mod defaults;
pub mod observability_config;
pub mod trust_config;
pub mod vector_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use categorizer_config::CategorizerConfig;
pub use decay_config::DecayConfig;
pub use dedup_config::{DedupConfig, SimilarityMode};
pub use observability_config::ObservabilityConfig;
pub use trust_config::{LayerWeight, TrustConfig, TrustMode};
pub use vector_config::VectorConfig;

use crate::constants::ENCODED_DIMENSIONS;
use crate::errors::{CaiResult, ConfigError};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaiConfig {
    pub dedup: DedupConfig,
    pub vector: VectorConfig,
    pub categorizer: CategorizerConfig,
    pub decay: DecayConfig,
    pub trust: TrustConfig,
    pub cache: CacheConfig,
    pub observability: ObservabilityConfig,
}

impl CaiConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(s: &str) -> CaiResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CaiResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Check value ranges across all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("dedup.fuzzy_threshold", self.dedup.fuzzy_threshold)?;
        non_negative("dedup.time_threshold_secs", self.dedup.time_threshold_secs)?;

        if self.vector.weights.len() != ENCODED_DIMENSIONS {
            return Err(ConfigError::InvalidValue {
                field: "vector.weights".into(),
                reason: format!(
                    "expected {ENCODED_DIMENSIONS} weights, got {}",
                    self.vector.weights.len()
                ),
            });
        }
        for w in &self.vector.weights {
            non_negative("vector.weights", *w)?;
        }

        unit_interval("categorizer.leaf_tolerance", self.categorizer.leaf_tolerance)?;
        if self.categorizer.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "categorizer.max_depth".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !self.categorizer.min_score.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "categorizer.min_score".into(),
                reason: "must be finite".into(),
            });
        }

        non_negative("decay.decay_rate", self.decay.decay_rate)?;
        unit_interval("trust.fixed_trust", self.trust.fixed_trust)?;
        Ok(())
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: format!("{value} is outside [0, 1]"),
        })
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: format!("{value} must be a finite non-negative number"),
        })
    }
}
