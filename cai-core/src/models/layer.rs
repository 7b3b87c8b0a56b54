//! Context layers: a payload viewed as a tree of weighted, trust-tagged facets.
//!
//! A nested JSON object becomes a [`ContextLayer`]; anything else is a leaf.
//! Layers declare their weight and trust through the reserved keys
//! [`LAYER_WEIGHT_KEY`] and [`LAYER_TRUST_KEY`], which are not part of the
//! layer's data.

use std::collections::BTreeMap;

use serde_json::Value;

use super::record::Payload;
use crate::constants::{LAYER_TRUST_KEY, LAYER_WEIGHT_KEY};
use crate::errors::LayerError;

/// Either a leaf value or a nested layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerNode {
    Leaf(Value),
    Layer(ContextLayer),
}

/// One facet of a context, possibly containing nested sub-layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextLayer {
    pub layer_id: String,
    pub data: BTreeMap<String, LayerNode>,
    /// Relative weight of this layer among its siblings. Never negative.
    pub weight: f64,
    /// Provenance trust in [0, 1].
    pub trust: f64,
}

impl ContextLayer {
    /// Build the root layer of a payload.
    ///
    /// Fails with [`LayerError::DepthExceeded`] when nesting goes deeper than
    /// `max_depth` levels below the root.
    pub fn from_payload(payload: &Payload, max_depth: usize) -> Result<Self, LayerError> {
        Self::build(String::new(), payload, 0, max_depth)
    }

    fn build(
        layer_id: String,
        map: &Payload,
        depth: usize,
        max_depth: usize,
    ) -> Result<Self, LayerError> {
        if depth > max_depth {
            return Err(LayerError::DepthExceeded { max_depth });
        }

        let weight = map
            .get(LAYER_WEIGHT_KEY)
            .and_then(Value::as_f64)
            .map(|w| w.max(0.0))
            .unwrap_or(1.0);
        let trust = map
            .get(LAYER_TRUST_KEY)
            .and_then(Value::as_f64)
            .map(|t| t.clamp(0.0, 1.0))
            .unwrap_or(1.0);

        let mut data = BTreeMap::new();
        for (key, value) in map {
            if key == LAYER_WEIGHT_KEY || key == LAYER_TRUST_KEY {
                continue;
            }
            let node = match value {
                Value::Object(inner) => {
                    LayerNode::Layer(Self::build(key.clone(), inner, depth + 1, max_depth)?)
                }
                other => LayerNode::Leaf(other.clone()),
            };
            data.insert(key.clone(), node);
        }

        Ok(Self {
            layer_id,
            data,
            weight,
            trust,
        })
    }

    /// Whether the layer carries no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Maximum nesting depth below this layer (0 for a flat layer).
    pub fn depth(&self) -> usize {
        self.data
            .values()
            .filter_map(|node| match node {
                LayerNode::Layer(layer) => Some(layer.depth() + 1),
                LayerNode::Leaf(_) => None,
            })
            .max()
            .unwrap_or(0)
    }
}

impl LayerNode {
    /// Declared weight of the node; leaves weigh 1.
    pub fn weight(&self) -> f64 {
        match self {
            LayerNode::Leaf(_) => 1.0,
            LayerNode::Layer(layer) => layer.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn nested_objects_become_layers() {
        let p = payload(json!({
            "role": "admin",
            "environment": {"@weight": 2.0, "@trust": 0.5, "camera": "cam1"}
        }));
        let root = ContextLayer::from_payload(&p, 8).unwrap();
        assert_eq!(root.data.len(), 2);
        match &root.data["environment"] {
            LayerNode::Layer(env) => {
                assert_eq!(env.layer_id, "environment");
                assert_eq!(env.weight, 2.0);
                assert_eq!(env.trust, 0.5);
                assert_eq!(env.data.len(), 1, "reserved keys are not data");
            }
            other => panic!("expected layer, got {other:?}"),
        }
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn trust_is_clamped_and_weight_floored() {
        let p = payload(json!({"env": {"@weight": -3.0, "@trust": 4.0, "x": 1}}));
        let root = ContextLayer::from_payload(&p, 8).unwrap();
        let LayerNode::Layer(env) = &root.data["env"] else {
            panic!("expected layer");
        };
        assert_eq!(env.weight, 0.0);
        assert_eq!(env.trust, 1.0);
    }

    #[test]
    fn depth_guard_rejects_deep_nesting() {
        let mut value = json!({"leaf": 1});
        for _ in 0..5 {
            value = json!({ "nested": value });
        }
        let p = payload(value);
        assert!(ContextLayer::from_payload(&p, 5).is_ok());
        assert_eq!(
            ContextLayer::from_payload(&p, 4),
            Err(LayerError::DepthExceeded { max_depth: 4 })
        );
    }
}
