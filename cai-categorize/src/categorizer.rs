use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use cai_core::config::CategorizerConfig;
use cai_core::errors::LayerError;
use cai_core::models::{CandidateCategory, ContextRecord, Payload};
use cai_core::traits::ITrustProvider;
use cai_trust::FixedTrust;

use crate::layers::{key_breakdown, LayerComparer};

/// Score breakdown for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    /// Structural similarity of the record and the candidate context.
    pub similarity: f64,
    /// Base weight floored at zero.
    pub base_weight: f64,
    pub candidate_trust: f64,
    pub item_trust: f64,
    /// `similarity × base_weight × candidate_trust × item_trust`.
    pub score: f64,
}

/// Picks the best-matching candidate category for a record.
pub struct Categorizer {
    comparer: LayerComparer,
    fallback_category: String,
    min_score: f64,
    trust: Arc<dyn ITrustProvider>,
}

impl Categorizer {
    pub fn new(config: &CategorizerConfig) -> Self {
        Self {
            comparer: LayerComparer::from_config(config),
            fallback_category: config.fallback_category.clone(),
            min_score: config.min_score,
            trust: Arc::new(FixedTrust::default()),
        }
    }

    pub fn with_trust_provider(mut self, trust: Arc<dyn ITrustProvider>) -> Self {
        self.trust = trust;
        self
    }

    pub fn fallback_category(&self) -> &str {
        &self.fallback_category
    }

    /// Category key for `item`.
    ///
    /// The highest-scoring candidate wins; ties go to the earlier candidate.
    /// With no candidates, or no score above `min_score`, the fallback
    /// category is returned.
    pub fn categorize(&self, item: &ContextRecord, candidates: &[CandidateCategory]) -> String {
        let best = self
            .rank(item, candidates)
            .into_iter()
            .fold(None::<CategoryScore>, |best, s| match best {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            });

        match best {
            Some(b) if b.score > self.min_score => b.category,
            best => {
                debug!(
                    record_id = %item.id,
                    candidates = candidates.len(),
                    best_score = best.map_or(0.0, |b| b.score),
                    fallback = %self.fallback_category,
                    "no candidate above minimum score"
                );
                self.fallback_category.clone()
            }
        }
    }

    /// Scores for every candidate, in candidate order.
    pub fn rank(&self, item: &ContextRecord, candidates: &[CandidateCategory]) -> Vec<CategoryScore> {
        let item_trust = self.trust.trust(&item.payload);
        candidates
            .iter()
            .map(|c| {
                let similarity = self.compare_layers(&item.payload, &c.context);
                let base_weight = c.effective_weight();
                let candidate_trust = self.trust.trust(&c.context);
                CategoryScore {
                    category: c.category.clone(),
                    similarity,
                    base_weight,
                    candidate_trust,
                    item_trust,
                    score: similarity * base_weight * candidate_trust * item_trust,
                }
            })
            .collect()
    }

    /// Structural similarity in [0, 1]; payloads nested too deeply score 0.
    pub fn compare_layers(&self, a: &Payload, b: &Payload) -> f64 {
        match self.comparer.try_compare(a, b) {
            Ok(score) => score,
            Err(e) => {
                warn!(error = %e, "layer comparison failed");
                0.0
            }
        }
    }

    /// Top-level per-key similarity between a record and one candidate.
    pub fn explain(&self, item: &ContextRecord, candidate: &CandidateCategory) -> BTreeMap<String, f64> {
        key_breakdown(&self.comparer, &item.payload, &candidate.context)
    }

    pub fn try_compare_layers(&self, a: &Payload, b: &Payload) -> Result<f64, LayerError> {
        self.comparer.try_compare(a, b)
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(&CategorizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    fn candidate(name: &str, value: serde_json::Value, weight: f64) -> CandidateCategory {
        CandidateCategory::new(name, payload(value), weight)
    }

    #[test]
    fn exact_match_wins() {
        let item = ContextRecord::new(payload(json!({"role": "admin", "label": "invoice"})));
        let candidates = vec![
            candidate("ops", json!({"role": "user", "label": "task"}), 1.0),
            candidate("finance", json!({"role": "admin", "label": "invoice"}), 1.0),
        ];
        assert_eq!(Categorizer::default().categorize(&item, &candidates), "finance");
    }

    #[test]
    fn exact_match_with_untrusted_layer_is_not_dropped() {
        let context = json!({"env": {"@trust": 0.0, "camera": "cam1"}});
        let item = ContextRecord::new(payload(context.clone()));
        let candidates = vec![candidate("cameras", context, 1.0)];
        assert_eq!(Categorizer::default().categorize(&item, &candidates), "cameras");
    }

    #[test]
    fn ties_go_to_the_earlier_candidate() {
        let item = ContextRecord::new(payload(json!({"role": "admin"})));
        let candidates = vec![
            candidate("first", json!({"role": "admin"}), 1.0),
            candidate("second", json!({"role": "admin"}), 1.0),
        ];
        assert_eq!(Categorizer::default().categorize(&item, &candidates), "first");
    }

    #[test]
    fn base_weight_can_outrank_similarity() {
        let item = ContextRecord::new(payload(json!({"role": "admin", "label": "task"})));
        let candidates = vec![
            candidate("exact", json!({"role": "admin", "label": "task"}), 0.4),
            candidate("partial", json!({"role": "admin"}), 1.0),
        ];
        assert_eq!(Categorizer::default().categorize(&item, &candidates), "partial");
    }

    #[test]
    fn negative_weight_never_wins() {
        let item = ContextRecord::new(payload(json!({"role": "admin"})));
        let candidates = vec![candidate("neg", json!({"role": "admin"}), -2.0)];
        assert_eq!(Categorizer::default().categorize(&item, &candidates), "uncategorized");
    }

    #[test]
    fn no_candidates_falls_back() {
        let item = ContextRecord::new(payload(json!({"role": "admin"})));
        assert_eq!(Categorizer::default().categorize(&item, &[]), "uncategorized");
    }

    #[test]
    fn configurable_fallback_and_min_score() {
        let config = CategorizerConfig {
            fallback_category: "other".into(),
            min_score: 0.6,
            ..CategorizerConfig::default()
        };
        let item = ContextRecord::new(payload(json!({"role": "admin", "label": "task"})));
        let candidates = vec![candidate("half", json!({"role": "admin"}), 1.0)];
        assert_eq!(Categorizer::new(&config).categorize(&item, &candidates), "other");
    }

    #[test]
    fn explain_scores_each_key() {
        let item = ContextRecord::new(payload(json!({"role": "admin", "env": {"camera": "cam1"}})));
        let c = candidate("c", json!({"role": "guest", "env": {"camera": "cam1"}, "mood": "happy"}), 1.0);
        let keys = Categorizer::default().explain(&item, &c);
        assert_eq!(keys["role"], 0.0);
        assert_eq!(keys["env"], 1.0);
        assert_eq!(keys["mood"], 0.0);
    }

    #[test]
    fn rank_reports_components() {
        let item = ContextRecord::new(payload(json!({"role": "admin"})));
        let candidates = vec![candidate("c", json!({"role": "admin"}), 0.5)];
        let scores = Categorizer::default().rank(&item, &candidates);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].similarity, 1.0);
        assert_eq!(scores[0].base_weight, 0.5);
        assert_eq!(scores[0].score, 0.5);
    }
}
