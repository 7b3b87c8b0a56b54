//! Payload similarity strategies.

use tracing::warn;

use cai_core::config::VectorConfig;
use cai_core::models::ContextRecord;
use cai_vector::text::normalized_similarity;
use cai_vector::{ContextEncoder, EncodingCache, VectorComparer};

/// Scores how alike two records' payloads are, in [0, 1].
pub trait SimilarityStrategy: Send + Sync {
    fn similarity(&self, a: &ContextRecord, b: &ContextRecord) -> f64;
}

/// Normalized edit similarity of the canonical payload JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSimilarity;

impl SimilarityStrategy for TextSimilarity {
    fn similarity(&self, a: &ContextRecord, b: &ContextRecord) -> f64 {
        normalized_similarity(&a.canonical_payload(), &b.canonical_payload())
    }
}

/// Weighted cosine similarity of encoded payloads.
///
/// A payload that cannot be encoded scores 0 against everything.
pub struct VectorSimilarity {
    encoder: ContextEncoder,
    comparer: VectorComparer,
    cache: EncodingCache,
}

impl VectorSimilarity {
    pub fn new(comparer: VectorComparer, cache_capacity: u64) -> Self {
        Self {
            encoder: ContextEncoder::new(),
            comparer,
            cache: EncodingCache::new(cache_capacity),
        }
    }

    pub fn from_config(config: &VectorConfig) -> Self {
        Self::new(VectorComparer::from_config(config), config.cache_capacity)
    }

    fn encode(&self, record: &ContextRecord) -> Option<Vec<f64>> {
        match self.cache.get_or_encode(&self.encoder, &record.payload) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(record_id = %record.id, error = %e, "payload cannot be encoded");
                None
            }
        }
    }
}

impl Default for VectorSimilarity {
    fn default() -> Self {
        Self::from_config(&VectorConfig::default())
    }
}

impl SimilarityStrategy for VectorSimilarity {
    fn similarity(&self, a: &ContextRecord, b: &ContextRecord) -> f64 {
        let (Some(va), Some(vb)) = (self.encode(a), self.encode(b)) else {
            return 0.0;
        };
        self.comparer.cosine_similarity(&va, &vb).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cai_core::models::Payload;
    use serde_json::json;

    fn rec(value: serde_json::Value) -> ContextRecord {
        ContextRecord::new(value.as_object().cloned().unwrap_or_else(Payload::new))
    }

    #[test]
    fn text_similarity_of_equal_payloads_is_one() {
        let a = rec(json!({"role": "admin", "label": "task"}));
        let b = rec(json!({"label": "task", "role": "admin"}));
        assert_eq!(TextSimilarity.similarity(&a, &b), 1.0);
    }

    #[test]
    fn text_similarity_drops_with_edits() {
        let a = rec(json!({"msg": "disk almost full"}));
        let b = rec(json!({"msg": "cpu load is high"}));
        assert!(TextSimilarity.similarity(&a, &b) < 0.8);
    }

    #[test]
    fn unencodable_payload_scores_zero() {
        let sim = VectorSimilarity::default();
        let bad = rec(json!({"role": 7}));
        assert_eq!(sim.similarity(&bad, &bad), 0.0);
    }

    #[test]
    fn vector_similarity_matches_encodings() {
        let sim = VectorSimilarity::default();
        let a = rec(json!({"role": "admin", "time": "morning"}));
        let b = rec(json!({"role": "Admin", "time": "08:30"}));
        assert!((sim.similarity(&a, &b) - 1.0).abs() < 1e-9);
    }
}
