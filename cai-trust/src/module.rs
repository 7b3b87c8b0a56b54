//! Presence trust combined with similarity to remembered trusted contexts.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use cai_core::models::Payload;
use cai_core::traits::ITrustProvider;

use crate::presence::is_present;

/// Feature scores keyed by layer name.
pub type FeatureMap = BTreeMap<String, f64>;

/// How two feature maps are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMethod {
    #[default]
    Cosine,
    /// `1 - distance / sqrt(n)`, floored at 0.
    Euclidean,
}

/// Flat layer weights plus a memory of trusted contexts.
#[derive(Debug, Clone, Default)]
pub struct TrustModule {
    weights: BTreeMap<String, f64>,
    method: DistanceMethod,
    required_layers: Vec<String>,
    memory: Vec<FeatureMap>,
}

impl TrustModule {
    pub fn new(weights: BTreeMap<String, f64>, method: DistanceMethod) -> Self {
        Self {
            weights,
            method,
            required_layers: Vec::new(),
            memory: Vec::new(),
        }
    }

    /// Layers whose absence is penalized when the module acts as a provider.
    pub fn with_required_layers<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_layers = layers.into_iter().map(Into::into).collect();
        self
    }

    pub fn method(&self) -> DistanceMethod {
        self.method
    }

    /// Weighted share of present layers.
    ///
    /// Each missing required layer subtracts its weight once more. The result
    /// is floored at 0; a zero total weight gives 0.
    pub fn calculate_trust(&self, presence: &BTreeMap<String, bool>, required_layers: &[String]) -> f64 {
        let total: f64 = self.weights.values().sum();
        if total <= 0.0 {
            return 0.0;
        }

        let mut present: f64 = presence
            .iter()
            .filter(|(_, present)| **present)
            .filter_map(|(layer, _)| self.weights.get(layer))
            .sum();
        for layer in required_layers {
            if !presence.get(layer).copied().unwrap_or(false) {
                present -= self.weights.get(layer).copied().unwrap_or(0.0);
            }
        }
        (present / total).clamp(0.0, 1.0)
    }

    /// Similarity of two feature maps aligned over the union of their keys.
    /// Missing features count as 0.
    pub fn compare_contexts(&self, a: &FeatureMap, b: &FeatureMap) -> f64 {
        let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
        if keys.is_empty() {
            return 0.0;
        }
        let pairs: Vec<(f64, f64)> = keys
            .iter()
            .map(|k| {
                (
                    a.get(*k).copied().unwrap_or(0.0),
                    b.get(*k).copied().unwrap_or(0.0),
                )
            })
            .collect();

        match self.method {
            DistanceMethod::Cosine => {
                let dot: f64 = pairs.iter().map(|(x, y)| x * y).sum();
                let na = pairs.iter().map(|(x, _)| x * x).sum::<f64>().sqrt();
                let nb = pairs.iter().map(|(_, y)| y * y).sum::<f64>().sqrt();
                if na == 0.0 || nb == 0.0 {
                    0.0
                } else {
                    (dot / (na * nb)).clamp(0.0, 1.0)
                }
            }
            DistanceMethod::Euclidean => {
                let dist = pairs.iter().map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt();
                let max_dist = (pairs.len() as f64).sqrt();
                (1.0 - dist / max_dist).max(0.0)
            }
        }
    }

    /// Remember a trusted context.
    pub fn add_to_memory(&mut self, context: FeatureMap) {
        self.memory.push(context);
    }

    pub fn load_examples(&mut self, examples: impl IntoIterator<Item = FeatureMap>) {
        self.memory.extend(examples);
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    /// Best similarity against memory; 0 when memory is empty.
    pub fn get_max_similarity(&self, context: &FeatureMap) -> f64 {
        self.memory
            .iter()
            .map(|m| self.compare_contexts(context, m))
            .fold(0.0, f64::max)
    }

    /// Presence trust scaled by the best memory similarity.
    pub fn compute_trust_with_memory(
        &self,
        presence: &BTreeMap<String, bool>,
        scores: &FeatureMap,
        required_layers: &[String],
    ) -> f64 {
        let base = self.calculate_trust(presence, required_layers);
        let similarity = self.get_max_similarity(scores);
        debug!(base, similarity, "trust with memory");
        base * similarity
    }

    /// Presence map of a payload over the configured layers.
    pub fn presence_of(&self, context: &Payload) -> BTreeMap<String, bool> {
        self.weights
            .keys()
            .map(|layer| {
                let present = context.get(layer).is_some_and(is_present);
                (layer.clone(), present)
            })
            .collect()
    }
}

impl ITrustProvider for TrustModule {
    fn trust(&self, context: &Payload) -> f64 {
        self.calculate_trust(&self.presence_of(context), &self.required_layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights() -> BTreeMap<String, f64> {
        BTreeMap::from([
            ("role".to_string(), 0.5),
            ("network".to_string(), 0.3),
            ("mood".to_string(), 0.2),
        ])
    }

    fn presence(items: &[(&str, bool)]) -> BTreeMap<String, bool> {
        items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn features(items: &[(&str, f64)]) -> FeatureMap {
        items.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn presence_trust() {
        let m = TrustModule::new(weights(), DistanceMethod::Cosine);
        let t = m.calculate_trust(&presence(&[("role", true), ("network", true)]), &[]);
        assert!((t - 0.8).abs() < 1e-9);
    }

    #[test]
    fn missing_required_layer_is_penalized() {
        let m = TrustModule::new(weights(), DistanceMethod::Cosine);
        let p = presence(&[("role", true), ("network", false)]);
        let t = m.calculate_trust(&p, &["network".to_string()]);
        assert!((t - 0.2).abs() < 1e-9);
        let floored = m.calculate_trust(&presence(&[]), &["role".to_string()]);
        assert_eq!(floored, 0.0);
    }

    #[test]
    fn unknown_layers_are_ignored() {
        let m = TrustModule::new(weights(), DistanceMethod::Cosine);
        assert_eq!(m.calculate_trust(&presence(&[("color", true)]), &[]), 0.0);
    }

    #[test]
    fn cosine_and_euclidean_comparison() {
        let a = features(&[("x", 1.0), ("y", 0.0)]);
        let b = features(&[("x", 1.0)]);
        let cos = TrustModule::new(weights(), DistanceMethod::Cosine);
        assert!((cos.compare_contexts(&a, &b) - 1.0).abs() < 1e-9);
        assert_eq!(cos.compare_contexts(&a, &features(&[("y", 1.0)])), 0.0);

        let euc = TrustModule::new(weights(), DistanceMethod::Euclidean);
        assert!((euc.compare_contexts(&a, &b) - 1.0).abs() < 1e-9);
        let far = euc.compare_contexts(&features(&[("x", 0.0)]), &features(&[("x", 5.0)]));
        assert_eq!(far, 0.0);
    }

    #[test]
    fn memory_similarity_scales_trust() {
        let mut m = TrustModule::new(weights(), DistanceMethod::Cosine);
        let p = presence(&[("role", true), ("network", true), ("mood", true)]);
        let s = features(&[("role", 1.0)]);
        assert_eq!(m.compute_trust_with_memory(&p, &s, &[]), 0.0, "empty memory");

        m.load_examples([features(&[("mood", 1.0)]), features(&[("role", 2.0)])]);
        assert_eq!(m.memory_len(), 2);
        assert!((m.get_max_similarity(&s) - 1.0).abs() < 1e-9);
        assert!((m.compute_trust_with_memory(&p, &s, &[]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn acts_as_trust_provider() {
        let m = TrustModule::new(weights(), DistanceMethod::Cosine).with_required_layers(["mood"]);
        let mut ctx = Payload::new();
        ctx.insert("role".into(), serde_json::json!("admin"));
        // role present (0.5), mood required but missing (-0.2)
        assert!((m.trust(&ctx) - 0.3).abs() < 1e-9);
    }
}
