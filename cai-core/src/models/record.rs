use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::confidence::Confidence;

/// A context payload: string keys to arbitrary JSON values.
///
/// `serde_json::Map` keeps keys sorted, so iteration and serialization are
/// independent of insertion order.
pub type Payload = Map<String, Value>;

/// One timestamped observation with a payload and provenance metadata.
///
/// Records are treated as immutable inputs: every stage reads them by
/// reference and produces new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    /// UUID v4 identifier, assigned at construction when absent.
    #[serde(default = "new_record_id")]
    pub id: String,
    /// Structured observation data.
    #[serde(default)]
    pub payload: Payload,
    /// When the observation was made.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Which source produced the record.
    #[serde(default)]
    pub source_id: Option<String>,
    /// Role of the producing actor.
    #[serde(default)]
    pub role: Option<String>,
    /// Free-text content.
    #[serde(default)]
    pub content: Option<String>,
    /// Source confidence in [0, 1].
    #[serde(default)]
    pub confidence: Confidence,
    /// Base relevance score used by decay scoring.
    #[serde(default)]
    pub base_score: Option<f64>,
}

fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl ContextRecord {
    /// Create a record with a fresh id, full confidence, and no metadata.
    pub fn new(payload: Payload) -> Self {
        Self {
            id: new_record_id(),
            payload,
            timestamp: None,
            source_id: None,
            role: None,
            content: None,
            confidence: Confidence::default(),
            base_score: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Confidence::new(confidence);
        self
    }

    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.base_score = Some(base_score);
        self
    }

    /// Canonical JSON of the payload (sorted keys).
    pub fn canonical_payload(&self) -> String {
        // A map of JSON values always serializes.
        serde_json::to_string(&self.payload).unwrap_or_default()
    }
}
