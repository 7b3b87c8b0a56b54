//! # cai-trust
//!
//! Trust providers used to scale category weights by how complete and
//! credible a context is.
//!
//! - [`FixedTrust`]: constant trust, the neutral default
//! - [`LayerWeightTrust`]: weighted share of known layers present in a context
//! - [`TrustModule`]: presence trust with required layers plus similarity to
//!   a memory of trusted contexts

pub mod fixed;
pub mod layer_weight;
pub mod module;
pub mod presence;

use std::sync::Arc;

use cai_core::config::{TrustConfig, TrustMode};
use cai_core::traits::ITrustProvider;

pub use fixed::FixedTrust;
pub use layer_weight::LayerWeightTrust;
pub use module::{DistanceMethod, TrustModule};

/// Build the trust provider selected by `config.mode`.
///
/// In `module` mode each top-level layer weighs the sum of its leaves and
/// comparisons use cosine similarity. The module starts with an empty memory.
pub fn from_config(config: &TrustConfig) -> Arc<dyn ITrustProvider> {
    match config.mode {
        TrustMode::Fixed => Arc::new(FixedTrust::new(config.fixed_trust)),
        TrustMode::LayerWeights => Arc::new(LayerWeightTrust::new(config.layer_weights.clone())),
        TrustMode::Module => {
            let weights = LayerWeightTrust::new(config.layer_weights.clone()).layer_totals();
            Arc::new(
                TrustModule::new(weights, DistanceMethod::Cosine)
                    .with_required_layers(config.required_layers.iter().cloned()),
            )
        }
    }
}
