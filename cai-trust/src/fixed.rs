use cai_core::models::Payload;
use cai_core::traits::ITrustProvider;

/// Assigns the same trust to every context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTrust(f64);

impl FixedTrust {
    /// Trust is clamped to [0, 1]; NaN becomes 0.
    pub fn new(trust: f64) -> Self {
        if trust.is_nan() {
            Self(0.0)
        } else {
            Self(trust.clamp(0.0, 1.0))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for FixedTrust {
    fn default() -> Self {
        Self(1.0)
    }
}

impl ITrustProvider for FixedTrust {
    fn trust(&self, _context: &Payload) -> f64 {
        self.0
    }
}
