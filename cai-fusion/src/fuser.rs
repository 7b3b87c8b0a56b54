use std::collections::BTreeMap;

use tracing::{debug, info};

use cai_core::constants::{CONTENT_SEPARATOR, MAX_LAYER_DEPTH};
use cai_core::models::{ContextRecord, FusedContext, Payload, TimeSpan};

use crate::payload::fuse_payloads;

/// Fuses the records of each category into one representative context.
#[derive(Debug, Clone, PartialEq)]
pub struct Fuser {
    max_depth: usize,
}

impl Fuser {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Fuse every non-empty group. Empty groups produce no entry.
    pub fn fuse(
        &self,
        groups: &BTreeMap<String, Vec<ContextRecord>>,
    ) -> BTreeMap<String, FusedContext> {
        let fused: BTreeMap<String, FusedContext> = groups
            .iter()
            .filter_map(|(category, members)| {
                self.fuse_group(category, members)
                    .map(|f| (category.clone(), f))
            })
            .collect();
        info!(groups = groups.len(), fused = fused.len(), "fusion complete");
        fused
    }

    /// Fuse one category's members, or `None` for an empty group.
    pub fn fuse_group(&self, category: &str, members: &[ContextRecord]) -> Option<FusedContext> {
        if members.is_empty() {
            return None;
        }

        let weighted: Vec<(&Payload, f64)> = members
            .iter()
            .map(|m| (&m.payload, m.confidence.value()))
            .collect();
        let fused_payload = fuse_payloads(&weighted, self.max_depth);

        let aggregate_confidence =
            members.iter().map(|m| m.confidence.value()).sum::<f64>() / members.len() as f64;
        let time_span = TimeSpan::covering(members.iter().filter_map(|m| m.timestamp));

        let aggregated_content = members
            .iter()
            .filter_map(|m| m.content.as_deref())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(CONTENT_SEPARATOR);

        let mut sources: Vec<String> = Vec::new();
        for source in members.iter().filter_map(|m| m.source_id.as_ref()) {
            if !sources.contains(source) {
                sources.push(source.clone());
            }
        }

        debug!(category, members = members.len(), "fused category");
        Some(FusedContext {
            category: category.to_string(),
            members: members.to_vec(),
            fused_payload,
            aggregate_confidence,
            time_span,
            aggregated_content,
            sources,
        })
    }
}

impl Default for Fuser {
    fn default() -> Self {
        Self::new(MAX_LAYER_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn rec(id: &str, value: serde_json::Value) -> ContextRecord {
        ContextRecord::new(value.as_object().cloned().unwrap()).with_id(id)
    }

    #[test]
    fn empty_groups_are_skipped() {
        let mut groups = BTreeMap::new();
        groups.insert("empty".to_string(), Vec::new());
        groups.insert("one".to_string(), vec![rec("a", json!({"x": 1}))]);
        let fused = Fuser::default().fuse(&groups);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused["one"].count(), 1);
    }

    #[test]
    fn metadata_is_aggregated() {
        let t0 = Utc::now();
        let members = vec![
            rec("a", json!({"x": 1}))
                .with_confidence(0.4)
                .with_timestamp(t0 + Duration::seconds(3))
                .with_content("first")
                .with_source("s1"),
            rec("b", json!({"x": 1}))
                .with_confidence(0.8)
                .with_content("")
                .with_source("s2"),
            rec("c", json!({"x": 1}))
                .with_confidence(0.6)
                .with_timestamp(t0)
                .with_content("third")
                .with_source("s1"),
        ];
        let fused = Fuser::default().fuse_group("cat", &members).unwrap();
        assert!((fused.aggregate_confidence - 0.6).abs() < 1e-12);
        let span = fused.time_span.unwrap();
        assert_eq!((span.start, span.end), (t0, t0 + Duration::seconds(3)));
        assert_eq!(fused.aggregated_content, "first | third");
        assert_eq!(fused.sources, vec!["s1", "s2"]);
        let ids: Vec<&str> = fused.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn no_timestamps_means_no_span() {
        let fused = Fuser::default()
            .fuse_group("cat", &[rec("a", json!({}))])
            .unwrap();
        assert!(fused.time_span.is_none());
        assert!(fused.aggregated_content.is_empty());
    }
}
