//! Recursive, weighted comparison of layered contexts.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use cai_core::config::CategorizerConfig;
use cai_core::errors::LayerError;
use cai_core::models::{ContextLayer, LayerNode, Payload};
use cai_vector::text::normalized_similarity;

/// Structural similarity of two payloads in [0, 1].
///
/// Both payloads become layer trees. Over the union of keys at each level the
/// score is a weighted average:
///
/// | key present in      | score                | weight                         |
/// |---------------------|----------------------|--------------------------------|
/// | one side only       | 0                    | that side's declared weight    |
/// | both, leaves        | leaf similarity      | 1                              |
/// | both, layers        | recursive score      | mean weight × min trust        |
/// | both, layer vs leaf | 0                    | mean weight                    |
///
/// When every weight at a level is zero the plain mean of the per-key scores
/// is used instead. Two empty nested layers match fully; an empty top level
/// scores 0.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerComparer {
    leaf_tolerance: f64,
    max_depth: usize,
}

impl LayerComparer {
    pub fn new(leaf_tolerance: f64, max_depth: usize) -> Self {
        Self {
            leaf_tolerance: leaf_tolerance.clamp(0.0, 1.0),
            max_depth,
        }
    }

    pub fn from_config(config: &CategorizerConfig) -> Self {
        Self::new(config.leaf_tolerance, config.max_depth)
    }

    /// Compare two payloads. Fails only when either nests deeper than `max_depth`.
    pub fn try_compare(&self, a: &Payload, b: &Payload) -> Result<f64, LayerError> {
        let la = ContextLayer::from_payload(a, self.max_depth)?;
        let lb = ContextLayer::from_payload(b, self.max_depth)?;
        Ok(self.compare_layer(&la, &lb))
    }

    fn compare_layer(&self, a: &ContextLayer, b: &ContextLayer) -> f64 {
        let keys: BTreeSet<&String> = a.data.keys().chain(b.data.keys()).collect();
        let (mut weighted, mut total) = (0.0, 0.0);
        let (mut plain, mut count) = (0.0, 0usize);

        for key in keys {
            let (score, weight) = match (a.data.get(key), b.data.get(key)) {
                (Some(only), None) | (None, Some(only)) => (0.0, only.weight()),
                (Some(LayerNode::Leaf(x)), Some(LayerNode::Leaf(y))) => (self.leaf_similarity(x, y), 1.0),
                (Some(LayerNode::Layer(x)), Some(LayerNode::Layer(y))) => {
                    let score = if x.is_empty() && y.is_empty() {
                        1.0
                    } else {
                        self.compare_layer(x, y)
                    };
                    (score, (x.weight + y.weight) / 2.0 * x.trust.min(y.trust))
                }
                (Some(x), Some(y)) => (0.0, (x.weight() + y.weight()) / 2.0),
                (None, None) => continue,
            };
            weighted += score * weight;
            total += weight;
            plain += score;
            count += 1;
        }

        if total > 0.0 {
            (weighted / total).clamp(0.0, 1.0)
        } else if count > 0 {
            (plain / count as f64).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Similarity of two leaf values.
    ///
    /// Equal values score 1. Strings, numbers, and arrays earn partial credit
    /// only when their similarity reaches `leaf_tolerance`.
    pub fn leaf_similarity(&self, a: &Value, b: &Value) -> f64 {
        if a == b {
            return 1.0;
        }
        let sim = match (a, b) {
            (Value::String(x), Value::String(y)) => {
                normalized_similarity(&x.to_lowercase(), &y.to_lowercase())
            }
            (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => numeric_similarity(x, y),
                _ => 0.0,
            },
            (Value::Array(x), Value::Array(y)) => jaccard(x, y),
            _ => 0.0,
        };
        if sim >= self.leaf_tolerance {
            sim
        } else {
            0.0
        }
    }
}

impl Default for LayerComparer {
    fn default() -> Self {
        Self::from_config(&CategorizerConfig::default())
    }
}

fn numeric_similarity(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        return 1.0;
    }
    (1.0 - (a - b).abs() / scale).max(0.0)
}

/// Jaccard similarity over array elements, compared by canonical JSON.
fn jaccard(a: &[Value], b: &[Value]) -> f64 {
    let sa: BTreeSet<String> = a.iter().map(Value::to_string).collect();
    let sb: BTreeSet<String> = b.iter().map(Value::to_string).collect();
    let union = sa.union(&sb).count();
    if union == 0 {
        return 1.0;
    }
    sa.intersection(&sb).count() as f64 / union as f64
}

/// Per-key similarity at the top level.
pub(crate) fn key_breakdown(comparer: &LayerComparer, a: &Payload, b: &Payload) -> BTreeMap<String, f64> {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    keys.into_iter()
        .map(|k| {
            let score = match (a.get(k), b.get(k)) {
                (Some(Value::Object(x)), Some(Value::Object(y))) => {
                    comparer.try_compare(x, y).unwrap_or(0.0)
                }
                (Some(x), Some(y)) => comparer.leaf_similarity(x, y),
                _ => 0.0,
            };
            (k.clone(), score)
        })
        .collect()
}
