use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{DEFAULT_FALLBACK_CATEGORY, MAX_LAYER_DEPTH};

/// Categorization subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizerConfig {
    /// Key returned when no candidate scores above `min_score`.
    pub fallback_category: String,
    /// A candidate must score strictly above this to be selected.
    pub min_score: f64,
    /// Minimum fuzzy similarity for a non-identical leaf to earn partial credit.
    pub leaf_tolerance: f64,
    /// Maximum layer nesting depth compared.
    pub max_depth: usize,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_string(),
            min_score: defaults::DEFAULT_MIN_SCORE,
            leaf_tolerance: defaults::DEFAULT_LEAF_TOLERANCE,
            max_depth: MAX_LAYER_DEPTH,
        }
    }
}
