use std::collections::BTreeMap;

use serde_json::Value;

use cai_core::config::trust_config::default_layer_weights;
use cai_core::config::LayerWeight;
use cai_core::models::Payload;
use cai_core::traits::ITrustProvider;

use crate::presence::is_present;

/// Trust as the weighted share of known layers present in a context.
///
/// `trust = Σ weight(present leaves) / Σ weight(all leaves)`. Nested weight
/// tables address sub-layers, so `environment.camera` is present only when
/// `context["environment"]` is an object with a present `camera` value.
/// An empty or zero-weight table yields trust 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerWeightTrust {
    weights: BTreeMap<String, LayerWeight>,
    total: f64,
}

impl LayerWeightTrust {
    pub fn new(weights: BTreeMap<String, LayerWeight>) -> Self {
        let total = total_weight(&weights);
        Self { weights, total }
    }

    pub fn weights(&self) -> &BTreeMap<String, LayerWeight> {
        &self.weights
    }

    /// Leaf weights flattened to dotted paths (`environment.camera`).
    pub fn flattened(&self) -> Vec<(String, f64)> {
        let mut out = Vec::new();
        flatten(&self.weights, "", &mut out);
        out
    }

    /// Total weight under each top-level layer.
    pub fn layer_totals(&self) -> BTreeMap<String, f64> {
        self.weights
            .iter()
            .map(|(layer, w)| {
                let total = match w {
                    LayerWeight::Weight(w) => leaf_weight(*w),
                    LayerWeight::Nested(inner) => total_weight(inner),
                };
                (layer.clone(), total)
            })
            .collect()
    }
}

impl Default for LayerWeightTrust {
    fn default() -> Self {
        Self::new(default_layer_weights())
    }
}

impl ITrustProvider for LayerWeightTrust {
    fn trust(&self, context: &Payload) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (present_weight(&self.weights, context) / self.total).clamp(0.0, 1.0)
    }
}

fn leaf_weight(w: f64) -> f64 {
    if w.is_finite() {
        w.max(0.0)
    } else {
        0.0
    }
}

fn total_weight(weights: &BTreeMap<String, LayerWeight>) -> f64 {
    weights
        .values()
        .map(|w| match w {
            LayerWeight::Weight(w) => leaf_weight(*w),
            LayerWeight::Nested(inner) => total_weight(inner),
        })
        .sum()
}

fn present_weight(weights: &BTreeMap<String, LayerWeight>, context: &Payload) -> f64 {
    weights
        .iter()
        .map(|(key, w)| match (w, context.get(key)) {
            (LayerWeight::Weight(w), Some(value)) if is_present(value) => leaf_weight(*w),
            (LayerWeight::Nested(inner), Some(Value::Object(sub))) => present_weight(inner, sub),
            _ => 0.0,
        })
        .sum()
}

fn flatten(weights: &BTreeMap<String, LayerWeight>, prefix: &str, out: &mut Vec<(String, f64)>) {
    for (key, w) in weights {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match w {
            LayerWeight::Weight(w) => out.push((path, leaf_weight(*w))),
            LayerWeight::Nested(inner) => flatten(inner, &path, out),
        }
    }
}
