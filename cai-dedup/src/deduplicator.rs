//! Time-windowed, single-linkage deduplication.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, info};

use cai_core::config::{DedupConfig, SimilarityMode, VectorConfig};
use cai_core::models::ContextRecord;
use cai_core::traits::{IDeduplicator, IMergeRule};

use crate::merge::HigherConfidence;
use crate::similarity::{SimilarityStrategy, TextSimilarity, VectorSimilarity};
use crate::union_find::UnionFind;

/// One output record and the ids of the inputs folded into it.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupGroup {
    pub record: ContextRecord,
    /// Member ids in processing order.
    pub member_ids: Vec<String>,
}

/// Collapses records that are close in time and similar in payload.
///
/// Records are processed in timestamp order; a record without a timestamp
/// takes the timestamp of the nearest earlier timestamped record in input
/// order. A pair is compared when both records are timestamped and at most
/// `time_threshold_secs` apart, or when they are adjacent in processing order
/// and at least one has no timestamp. Pairs scoring at or above
/// `fuzzy_threshold` are linked, and each connected group becomes one record.
/// Linking is transitive, so a chain of close records can produce a group
/// whose time extent exceeds `time_threshold_secs`.
pub struct Deduplicator {
    time_threshold_secs: f64,
    fuzzy_threshold: f64,
    similarity: Arc<dyn SimilarityStrategy>,
    merge_rule: Arc<dyn IMergeRule>,
}

impl Deduplicator {
    pub fn new(time_threshold_secs: f64, fuzzy_threshold: f64) -> Self {
        Self {
            time_threshold_secs: time_threshold_secs.max(0.0),
            fuzzy_threshold: fuzzy_threshold.clamp(0.0, 1.0),
            similarity: Arc::new(TextSimilarity),
            merge_rule: Arc::new(HigherConfidence),
        }
    }

    pub fn from_config(dedup: &DedupConfig, vector: &VectorConfig) -> Self {
        let similarity: Arc<dyn SimilarityStrategy> = match dedup.similarity {
            SimilarityMode::Text => Arc::new(TextSimilarity),
            SimilarityMode::Vector => Arc::new(VectorSimilarity::from_config(vector)),
        };
        Self::new(dedup.time_threshold_secs, dedup.fuzzy_threshold).with_similarity(similarity)
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn SimilarityStrategy>) -> Self {
        self.similarity = similarity;
        self
    }

    /// Replace the merge rule. Closures `Fn(&ContextRecord, &ContextRecord) -> ContextRecord` work.
    pub fn with_merge_rule(mut self, rule: impl IMergeRule + 'static) -> Self {
        self.merge_rule = Arc::new(rule);
        self
    }

    pub fn with_shared_merge_rule(mut self, rule: Arc<dyn IMergeRule>) -> Self {
        self.merge_rule = rule;
        self
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    pub fn time_threshold_secs(&self) -> f64 {
        self.time_threshold_secs
    }

    /// Deduplicate and report which inputs went into each output.
    pub fn deduplicate_groups(&self, records: &[ContextRecord]) -> Vec<DedupGroup> {
        if records.is_empty() {
            return Vec::new();
        }

        let order = processing_order(records);
        let sorted: Vec<&ContextRecord> = order.iter().map(|(i, _)| &records[*i]).collect();
        let effective: Vec<Option<DateTime<Utc>>> = order.iter().map(|(_, ts)| *ts).collect();

        let (sorted_ref, effective_ref) = (&sorted, &effective);
        let links: Vec<(usize, usize)> = (0..sorted.len())
            .into_par_iter()
            .flat_map_iter(|i| {
                self.candidates(sorted_ref, effective_ref, i)
                    .into_iter()
                    .filter(move |&j| {
                        self.similarity.similarity(sorted_ref[i], sorted_ref[j])
                            >= self.fuzzy_threshold
                    })
                    .map(move |j| (i, j))
            })
            .collect();

        let mut uf = UnionFind::new(sorted.len());
        for (i, j) in &links {
            uf.union(*i, *j);
        }

        // Roots are the smallest member position, so BTreeMap order is
        // first-member order.
        let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for pos in 0..sorted.len() {
            members.entry(uf.find(pos)).or_default().push(pos);
        }

        let groups: Vec<DedupGroup> = members
            .into_values()
            .map(|positions| self.fold_group(&sorted, &positions))
            .collect();

        info!(
            input = records.len(),
            output = groups.len(),
            links = links.len(),
            "deduplication complete"
        );
        groups
    }

    /// Positions `j > i` eligible for comparison with `i`.
    fn candidates(
        &self,
        sorted: &[&ContextRecord],
        effective: &[Option<DateTime<Utc>>],
        i: usize,
    ) -> Vec<usize> {
        let Some(ti) = sorted[i].timestamp else {
            return if i + 1 < sorted.len() { vec![i + 1] } else { Vec::new() };
        };

        let mut out = Vec::new();
        for j in (i + 1)..sorted.len() {
            if j == i + 1 && sorted[j].timestamp.is_none() {
                out.push(j);
                continue;
            }
            // Effective timestamps never decrease along processing order.
            if let Some(ej) = effective[j] {
                if seconds_between(ti, ej) > self.time_threshold_secs {
                    break;
                }
            }
            if let Some(tj) = sorted[j].timestamp {
                if seconds_between(ti, tj) <= self.time_threshold_secs {
                    out.push(j);
                }
            }
        }
        out
    }

    fn fold_group(&self, sorted: &[&ContextRecord], positions: &[usize]) -> DedupGroup {
        let mut merged = sorted[positions[0]].clone();
        for &pos in &positions[1..] {
            let incoming = sorted[pos];
            merged = self.merge_rule.merge(&merged, incoming);
            debug!(kept = %merged.id, incoming = %incoming.id, "merged duplicate");
        }
        DedupGroup {
            record: merged,
            member_ids: positions.iter().map(|&p| sorted[p].id.clone()).collect(),
        }
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::from_config(&DedupConfig::default(), &VectorConfig::default())
    }
}

impl IDeduplicator for Deduplicator {
    fn deduplicate(&self, records: &[ContextRecord]) -> Vec<ContextRecord> {
        self.deduplicate_groups(records)
            .into_iter()
            .map(|g| g.record)
            .collect()
    }
}

/// Input indices in processing order, with each record's effective timestamp.
fn processing_order(records: &[ContextRecord]) -> Vec<(usize, Option<DateTime<Utc>>)> {
    let mut last_seen = None;
    let mut order: Vec<(usize, Option<DateTime<Utc>>)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if r.timestamp.is_some() {
                last_seen = r.timestamp;
            }
            (i, last_seen)
        })
        .collect();
    order.sort_by_key(|(_, ts)| *ts);
    order
}

fn seconds_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    let delta = b - a;
    let secs = match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1000.0,
    };
    secs.abs()
}
