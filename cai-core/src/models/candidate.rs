use serde::{Deserialize, Serialize};

use super::record::Payload;

/// A category the categorizer may assign, with the template context it is
/// matched against. Supplied by the caller per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCategory {
    /// Category key returned on a match.
    pub category: String,
    /// Template context to compare records against.
    #[serde(default)]
    pub context: Payload,
    /// Non-negative multiplier on the structural match score.
    #[serde(default = "default_base_weight")]
    pub base_weight: f64,
}

fn default_base_weight() -> f64 {
    1.0
}

impl CandidateCategory {
    pub fn new(category: impl Into<String>, context: Payload, base_weight: f64) -> Self {
        Self {
            category: category.into(),
            context,
            base_weight,
        }
    }

    /// Base weight floored at zero.
    pub fn effective_weight(&self) -> f64 {
        if self.base_weight.is_nan() {
            return 0.0;
        }
        self.base_weight.max(0.0)
    }
}
