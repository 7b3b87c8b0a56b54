//! Shared builders and JSON fixtures for workspace tests.
//!
//! Fixtures live in `test-fixtures/data/` and are found by walking up from
//! `CARGO_MANIFEST_DIR`, so any crate in the workspace can load them.

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use cai_core::models::{CandidateCategory, ContextRecord, Payload};

fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").join("data").exists() {
        if !path.pop() {
            panic!("Could not find test-fixtures/data from CARGO_MANIFEST_DIR={manifest_dir}");
        }
    }
    path.join("test-fixtures").join("data")
}

/// Load and deserialize a JSON fixture.
///
/// # Panics
/// Panics if the file is missing or malformed.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn load_records(relative_path: &str) -> Vec<ContextRecord> {
    load_fixture(relative_path)
}

pub fn load_candidates(relative_path: &str) -> Vec<CandidateCategory> {
    load_fixture(relative_path)
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Fixed reference instant so tests are reproducible.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 21, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// `base_time()` shifted by whole seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    base_time() + Duration::seconds(secs)
}

/// Payload from a `json!` object literal.
///
/// # Panics
/// Panics if `value` is not an object.
pub fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => panic!("payload fixture must be an object, got {other}"),
    }
}

pub fn record(id: &str, value: Value) -> ContextRecord {
    ContextRecord::new(payload(value)).with_id(id)
}

/// Record timestamped `secs` after `base_time()`.
pub fn record_at(id: &str, value: Value, secs: i64) -> ContextRecord {
    record(id, value).with_timestamp(at(secs))
}

pub fn candidate(category: &str, value: Value, base_weight: f64) -> CandidateCategory {
    CandidateCategory::new(category, payload(value), base_weight)
}
