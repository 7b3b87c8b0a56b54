//! ContextPipeline: stateless per-batch orchestration.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use cai_categorize::Categorizer;
use cai_core::config::CaiConfig;
use cai_core::errors::CaiResult;
use cai_core::models::{CandidateCategory, ContextRecord, FusedContext};
use cai_core::traits::{IMergeRule, ITrustProvider};
use cai_dedup::Deduplicator;
use cai_fusion::Fuser;
use cai_observability::{categorize_span, dedup_span, fusion_span, pipeline_span};

use crate::report::{PipelineReport, PipelineStats};

/// Runs deduplication, categorization, and fusion over a batch.
///
/// Holds no per-run state; one pipeline may serve concurrent callers.
pub struct ContextPipeline {
    deduplicator: Deduplicator,
    categorizer: Categorizer,
    fuser: Fuser,
}

impl ContextPipeline {
    pub fn new(deduplicator: Deduplicator, categorizer: Categorizer, fuser: Fuser) -> Self {
        Self {
            deduplicator,
            categorizer,
            fuser,
        }
    }

    /// Build every stage from a validated config.
    pub fn from_config(config: &CaiConfig) -> CaiResult<Self> {
        config.validate()?;
        let deduplicator = Deduplicator::from_config(&config.dedup, &config.vector);
        let categorizer = Categorizer::new(&config.categorizer)
            .with_trust_provider(cai_trust::from_config(&config.trust));
        let fuser = Fuser::new(config.categorizer.max_depth);
        Ok(Self::new(deduplicator, categorizer, fuser))
    }

    pub fn with_merge_rule(mut self, rule: impl IMergeRule + 'static) -> Self {
        self.deduplicator = self.deduplicator.with_merge_rule(rule);
        self
    }

    pub fn with_trust_provider(mut self, trust: Arc<dyn ITrustProvider>) -> Self {
        self.categorizer = self.categorizer.with_trust_provider(trust);
        self
    }

    pub fn deduplicator(&self) -> &Deduplicator {
        &self.deduplicator
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Fused context per category. Empty input gives an empty map.
    pub fn run(
        &self,
        batch: &[ContextRecord],
        candidates: &[CandidateCategory],
    ) -> BTreeMap<String, FusedContext> {
        self.run_with_report(batch, candidates).fused
    }

    pub fn run_with_report(
        &self,
        batch: &[ContextRecord],
        candidates: &[CandidateCategory],
    ) -> PipelineReport {
        let started = Instant::now();
        let _run = pipeline_span!(batch.len(), candidates.len()).entered();

        let survivors = {
            let _span = dedup_span!(batch.len()).entered();
            self.deduplicator.deduplicate_groups(batch)
        };

        let categories: Vec<String> = {
            let _span = categorize_span!(survivors.len(), candidates.len()).entered();
            survivors
                .par_iter()
                .map(|g| self.categorizer.categorize(&g.record, candidates))
                .collect()
        };

        let mut groups: BTreeMap<String, Vec<ContextRecord>> = BTreeMap::new();
        for (group, category) in survivors.iter().zip(categories) {
            groups.entry(category).or_default().push(group.record.clone());
        }
        let category_counts = groups.iter().map(|(k, v)| (k.clone(), v.len())).collect();

        let fused = {
            let _span = fusion_span!(groups.len()).entered();
            self.fuser.fuse(&groups)
        };

        let stats = PipelineStats {
            input_records: batch.len(),
            deduplicated_records: survivors.len(),
            category_counts,
            elapsed: started.elapsed(),
        };
        info!(
            input = stats.input_records,
            deduplicated = stats.deduplicated_records,
            categories = fused.len(),
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "pipeline run complete"
        );
        PipelineReport { fused, stats }
    }
}

impl Default for ContextPipeline {
    fn default() -> Self {
        Self::new(Deduplicator::default(), Categorizer::default(), Fuser::default())
    }
}
