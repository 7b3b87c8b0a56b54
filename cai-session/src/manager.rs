//! ContextManager: concurrent keyed context cache via DashMap.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use cai_core::config::CacheConfig;
use cai_core::models::Payload;

use crate::entry::{CacheEntry, HistoryEntry};

static GLOBAL: OnceLock<ContextManager> = OnceLock::new();

/// Thread-safe context cache.
///
/// Updates to one key are serialized by the map's shard lock, and the history
/// timestamp of an update is taken while that lock is held, so history order
/// matches update order. Expiry is lazy: reads treat an expired value as
/// absent, and [`compact_expired`](Self::compact_expired) clears such values
/// without touching history.
#[derive(Clone, Default)]
pub struct ContextManager {
    entries: Arc<DashMap<String, CacheEntry>>,
    roles: Arc<DashMap<String, String>>,
    default_ttl: Option<Duration>,
}

impl ContextManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager whose updates without an explicit TTL use `ttl`.
    pub fn with_default_ttl(ttl: Duration) -> Self {
        Self {
            default_ttl: Some(ttl),
            ..Self::default()
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        match config.default_ttl_secs {
            Some(secs) => Self::with_default_ttl(Duration::from_secs(secs)),
            None => Self::new(),
        }
    }

    /// Process-wide instance.
    pub fn global() -> &'static ContextManager {
        GLOBAL.get_or_init(ContextManager::new)
    }

    /// Replace the value of `key` and append the update to its history.
    ///
    /// `ttl` of `None` falls back to the default TTL, if any; without one the
    /// value never expires.
    pub fn update_context(&self, key: &str, data: Payload, ttl: Option<Duration>) {
        self.apply_update(key, data, ttl, Utc::now);
    }

    /// [`update_context`](Self::update_context) at an explicit instant.
    pub fn update_context_at(&self, key: &str, data: Payload, ttl: Option<Duration>, now: DateTime<Utc>) {
        self.apply_update(key, data, ttl, || now);
    }

    fn apply_update(
        &self,
        key: &str,
        data: Payload,
        ttl: Option<Duration>,
        clock: impl FnOnce() -> DateTime<Utc>,
    ) {
        let ttl = ttl.or(self.default_ttl);
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| CacheEntry::new(key));

        let now = clock();
        entry.expires_at = ttl.and_then(|ttl| {
            chrono::Duration::from_std(ttl)
                .ok()
                .and_then(|d| now.checked_add_signed(d))
        });
        entry.history.push(HistoryEntry {
            data: data.clone(),
            timestamp: now,
        });
        entry.value = data;
        debug!(key, history = entry.history.len(), expires_at = ?entry.expires_at, "context updated");
    }

    /// Current value, or an empty map when absent or expired.
    pub fn get(&self, key: &str) -> Payload {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Payload {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => entry.value.clone(),
            _ => Payload::new(),
        }
    }

    /// Every update of `key`, oldest first, regardless of expiry.
    pub fn get_history(&self, key: &str) -> Vec<HistoryEntry> {
        self.entries
            .get(key)
            .map(|e| e.history.clone())
            .unwrap_or_default()
    }

    /// Snapshot of the full entry, expired or not.
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|e| e.clone())
    }

    /// Clear expired values, keeping their history. Returns how many were cleared.
    pub fn compact_expired(&self) -> usize {
        self.compact_expired_at(Utc::now())
    }

    pub fn compact_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut cleared = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.is_expired_at(now) {
                entry.value = Payload::new();
                entry.expires_at = None;
                cleared += 1;
            }
        }
        if cleared > 0 {
            debug!(cleared, "compacted expired contexts");
        }
        cleared
    }

    /// Record the role of a user.
    pub fn assign_role(&self, user_id: &str, role: &str) {
        self.roles.insert(user_id.to_string(), role.to_string());
    }

    pub fn get_role(&self, user_id: &str) -> Option<String> {
        self.roles.get(user_id).map(|r| r.clone())
    }

    /// All keys that have ever been updated.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_key_reads_empty() {
        let m = ContextManager::new();
        assert!(m.get("nope").is_empty());
        assert!(m.get_history("nope").is_empty());
        assert!(m.entry("nope").is_none());
    }

    #[test]
    fn expiry_at_explicit_instants() {
        let m = ContextManager::new();
        let t0 = Utc::now();
        m.update_context_at("k", payload(json!({"a": 1})), Some(Duration::from_secs(10)), t0);
        assert_eq!(m.get_at("k", t0 + chrono::Duration::seconds(9)), payload(json!({"a": 1})));
        assert!(m.get_at("k", t0 + chrono::Duration::seconds(10)).is_empty());
    }

    #[test]
    fn update_without_ttl_clears_expiry() {
        let m = ContextManager::new();
        let t0 = Utc::now();
        m.update_context_at("k", payload(json!({"a": 1})), Some(Duration::from_secs(1)), t0);
        m.update_context_at("k", payload(json!({"a": 2})), None, t0);
        assert_eq!(m.get_at("k", t0 + chrono::Duration::days(1)), payload(json!({"a": 2})));
    }

    #[test]
    fn default_ttl_applies() {
        let m = ContextManager::from_config(&CacheConfig {
            default_ttl_secs: Some(5),
        });
        let t0 = Utc::now();
        m.update_context_at("k", payload(json!({"a": 1})), None, t0);
        assert!(m.get_at("k", t0 + chrono::Duration::seconds(6)).is_empty());
    }

    #[test]
    fn compaction_keeps_history() {
        let m = ContextManager::new();
        let t0 = Utc::now();
        m.update_context_at("old", payload(json!({"a": 1})), Some(Duration::from_secs(1)), t0);
        m.update_context_at("live", payload(json!({"b": 1})), None, t0);
        assert_eq!(m.compact_expired_at(t0 + chrono::Duration::seconds(2)), 1);

        let old = m.entry("old").unwrap();
        assert!(old.value.is_empty());
        assert_eq!(old.history.len(), 1);
        assert_eq!(m.get_at("live", t0), payload(json!({"b": 1})));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn roles() {
        let m = ContextManager::new();
        assert_eq!(m.get_role("u1"), None);
        m.assign_role("u1", "admin");
        m.assign_role("u1", "guest");
        assert_eq!(m.get_role("u1").as_deref(), Some("guest"));
    }
}
