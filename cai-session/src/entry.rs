use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cai_core::models::Payload;

/// One recorded update of a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub data: Payload,
    pub timestamp: DateTime<Utc>,
}

/// Current value of a key plus every update it has received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub value: Payload,
    /// `None` never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Oldest first.
    pub history: Vec<HistoryEntry>,
}

impl CacheEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Payload::new(),
            expires_at: None,
            history: Vec::new(),
        }
    }

    /// Expired once `now` reaches `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}
