use cai_core::models::ContextRecord;
use cai_core::traits::IMergeRule;

/// Default merge rule.
///
/// The record with higher confidence wins. On equal confidence the later
/// timestamp wins, with a missing timestamp counting as earliest. On a full
/// tie the incoming record wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct HigherConfidence;

impl IMergeRule for HigherConfidence {
    fn merge(&self, existing: &ContextRecord, incoming: &ContextRecord) -> ContextRecord {
        let (a, b) = (existing.confidence.value(), incoming.confidence.value());
        if a > b {
            return existing.clone();
        }
        if b > a {
            return incoming.clone();
        }
        // Option ordering puts None first.
        if existing.timestamp > incoming.timestamp {
            existing.clone()
        } else {
            incoming.clone()
        }
    }
}
