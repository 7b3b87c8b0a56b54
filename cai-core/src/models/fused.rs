use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{ContextRecord, Payload};

/// Earliest and latest member timestamps of a fused context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    /// Span covering every given timestamp, or `None` for an empty input.
    pub fn covering<I>(timestamps: I) -> Option<Self>
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        timestamps.into_iter().fold(None, |span, ts| match span {
            None => Some(Self { start: ts, end: ts }),
            Some(s) => Some(Self {
                start: s.start.min(ts),
                end: s.end.max(ts),
            }),
        })
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// One category's representative context, produced per pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedContext {
    /// Category key.
    pub category: String,
    /// Records fused into this context, in grouping order.
    pub members: Vec<ContextRecord>,
    /// Key-by-key fusion of member payloads.
    pub fused_payload: Payload,
    /// Mean member confidence.
    pub aggregate_confidence: f64,
    /// Min/max of present member timestamps.
    pub time_span: Option<TimeSpan>,
    /// Non-empty member contents joined with `" | "`.
    pub aggregated_content: String,
    /// Distinct member source ids, first-seen order.
    pub sources: Vec<String>,
}

impl FusedContext {
    /// Number of fused members.
    pub fn count(&self) -> usize {
        self.members.len()
    }
}
