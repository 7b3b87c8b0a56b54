use std::collections::BTreeMap;
use std::time::Duration;

use cai_core::models::FusedContext;

/// Counts and timing of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineStats {
    pub input_records: usize,
    /// Records left after deduplication.
    pub deduplicated_records: usize,
    /// Records per category key.
    pub category_counts: BTreeMap<String, usize>,
    pub elapsed: Duration,
}

impl PipelineStats {
    /// Records removed as duplicates.
    pub fn duplicates_removed(&self) -> usize {
        self.input_records - self.deduplicated_records
    }
}

/// Fused output plus run statistics.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub fused: BTreeMap<String, FusedContext>,
    pub stats: PipelineStats,
}
