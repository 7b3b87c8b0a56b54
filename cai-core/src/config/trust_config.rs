use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Which trust provider the categorizer consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustMode {
    /// Every context gets `fixed_trust`.
    #[default]
    Fixed,
    /// Trust is the weighted share of configured layers present in a context.
    LayerWeights,
    /// Top-level layer weights with `required_layers` penalized when absent.
    Module,
}

/// A layer weight, or a table of sub-layer weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerWeight {
    Weight(f64),
    Nested(BTreeMap<String, LayerWeight>),
}

/// Trust subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    pub mode: TrustMode,
    /// Trust returned in `fixed` mode. In [0, 1].
    pub fixed_trust: f64,
    /// Layer weights used in `layer_weights` and `module` modes.
    pub layer_weights: BTreeMap<String, LayerWeight>,
    /// Layers whose absence lowers trust in `module` mode.
    pub required_layers: Vec<String>,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            mode: TrustMode::default(),
            fixed_trust: defaults::DEFAULT_FIXED_TRUST,
            layer_weights: default_layer_weights(),
            required_layers: Vec::new(),
        }
    }
}

/// Default layer weights; they sum to 1.0.
pub fn default_layer_weights() -> BTreeMap<String, LayerWeight> {
    let environment = BTreeMap::from([
        ("camera".to_string(), LayerWeight::Weight(0.09)),
        ("temperature".to_string(), LayerWeight::Weight(0.09)),
    ]);
    BTreeMap::from([
        ("role".to_string(), LayerWeight::Weight(0.18)),
        ("environment".to_string(), LayerWeight::Nested(environment)),
        ("network".to_string(), LayerWeight::Weight(0.12)),
        ("input".to_string(), LayerWeight::Weight(0.12)),
        ("timeframe".to_string(), LayerWeight::Weight(0.1)),
        ("mood".to_string(), LayerWeight::Weight(0.08)),
        ("label".to_string(), LayerWeight::Weight(0.1)),
        ("device".to_string(), LayerWeight::Weight(0.06)),
        ("location".to_string(), LayerWeight::Weight(0.06)),
    ])
}
