use chrono::{DateTime, Utc};
use serde_json::Value;

use cai_core::config::DecayConfig;
use cai_core::models::ContextRecord;
use cai_core::traits::IContextScorer;

/// Scores records as `base * exp(-decay_rate * age_secs)`.
///
/// The base is read from `payload[base_score_key]` when numeric, then from
/// the record's `base_score`, else 0. Records without a timestamp keep their
/// base score. Ages are floored at zero so future timestamps are not boosted.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDecayScorer {
    base_score_key: String,
    decay_rate: f64,
}

impl TimeDecayScorer {
    pub fn new(base_score_key: impl Into<String>, decay_rate: f64) -> Self {
        Self {
            base_score_key: base_score_key.into(),
            decay_rate: decay_rate.max(0.0),
        }
    }

    pub fn from_config(config: &DecayConfig) -> Self {
        Self::new(config.base_score_key.clone(), config.decay_rate)
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    /// Undecayed score of a record.
    pub fn base_score(&self, record: &ContextRecord) -> f64 {
        record
            .payload
            .get(&self.base_score_key)
            .and_then(Value::as_f64)
            .or(record.base_score)
            .unwrap_or(0.0)
    }

    /// Score relative to an explicit instant.
    pub fn score_at(&self, record: &ContextRecord, now: DateTime<Utc>) -> f64 {
        let base = self.base_score(record);
        match record.timestamp {
            Some(ts) => {
                let age_secs = ((now - ts).num_milliseconds() as f64 / 1000.0).max(0.0);
                base * (-self.decay_rate * age_secs).exp()
            }
            None => base,
        }
    }

    /// Score every record against one instant.
    pub fn score_batch(&self, records: &[ContextRecord], now: DateTime<Utc>) -> Vec<f64> {
        records.iter().map(|r| self.score_at(r, now)).collect()
    }

    /// Records paired with their scores, highest first. Equal scores keep input order.
    pub fn rank<'a>(
        &self,
        records: &'a [ContextRecord],
        now: DateTime<Utc>,
    ) -> Vec<(&'a ContextRecord, f64)> {
        let mut ranked: Vec<_> = records.iter().map(|r| (r, self.score_at(r, now))).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

impl Default for TimeDecayScorer {
    fn default() -> Self {
        Self::from_config(&DecayConfig::default())
    }
}

impl IContextScorer for TimeDecayScorer {
    fn score(&self, record: &ContextRecord) -> f64 {
        self.score_at(record, Utc::now())
    }
}
