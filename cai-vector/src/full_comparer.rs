//! Whole-context comparison: encode, compare, then scale by trust.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use cai_core::config::VectorConfig;
use cai_core::errors::CaiResult;
use cai_core::models::Payload;
use cai_core::traits::ITrustProvider;

use crate::cache::EncodingCache;
use crate::comparer::VectorComparer;
use crate::encoder::ContextEncoder;

/// Compares contexts end to end.
///
/// The score is the weighted cosine similarity of the two encodings multiplied
/// by the mean trust of both contexts. Without a trust provider every context
/// is fully trusted.
pub struct FullVectorComparer {
    encoder: ContextEncoder,
    comparer: VectorComparer,
    cache: EncodingCache,
    trust: Option<Arc<dyn ITrustProvider>>,
}

impl FullVectorComparer {
    pub fn new(comparer: VectorComparer, cache_capacity: u64) -> Self {
        Self {
            encoder: ContextEncoder::new(),
            comparer,
            cache: EncodingCache::new(cache_capacity),
            trust: None,
        }
    }

    pub fn from_config(config: &VectorConfig) -> Self {
        Self::new(VectorComparer::from_config(config), config.cache_capacity)
    }

    /// Scale scores by this provider's trust.
    pub fn with_trust_provider(mut self, provider: Arc<dyn ITrustProvider>) -> Self {
        self.trust = Some(provider);
        self
    }

    /// Encode a context through the cache.
    pub fn encode(&self, context: &Payload) -> CaiResult<Vec<f64>> {
        Ok(self.cache.get_or_encode(&self.encoder, context)?)
    }

    /// Similarity of two contexts in [0, 1].
    pub fn compare(&self, a: &Payload, b: &Payload) -> CaiResult<f64> {
        let va = self.encode(a)?;
        let vb = self.encode(b)?;
        let similarity = self.comparer.cosine_similarity(&va, &vb)?;
        let trust = match &self.trust {
            Some(provider) => (provider.trust(a) + provider.trust(b)) / 2.0,
            None => 1.0,
        };
        Ok((similarity * trust).clamp(0.0, 1.0))
    }

    /// Scores for every pair `(i, j)` with `i < j`.
    ///
    /// Each context is encoded once. Fails on the first context that cannot
    /// be encoded.
    pub fn compare_batch(&self, contexts: &[Payload]) -> CaiResult<BTreeMap<(usize, usize), f64>> {
        let vectors = contexts
            .iter()
            .map(|c| self.encode(c))
            .collect::<CaiResult<Vec<_>>>()?;
        let trusts: Vec<f64> = contexts
            .iter()
            .map(|c| self.trust.as_ref().map_or(1.0, |p| p.trust(c)))
            .collect();

        let mut scores = BTreeMap::new();
        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                let similarity = self.comparer.cosine_similarity(&vectors[i], &vectors[j])?;
                let trust = (trusts[i] + trusts[j]) / 2.0;
                scores.insert((i, j), (similarity * trust).clamp(0.0, 1.0));
            }
        }
        debug!(contexts = contexts.len(), pairs = scores.len(), "batch comparison complete");
        Ok(scores)
    }

    pub fn comparer(&self) -> &VectorComparer {
        &self.comparer
    }
}

impl Default for FullVectorComparer {
    fn default() -> Self {
        Self::from_config(&VectorConfig::default())
    }
}
