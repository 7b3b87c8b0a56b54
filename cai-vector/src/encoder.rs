//! Deterministic context → vector encoding.
//!
//! Layout (9 dimensions):
//!
//! ```text
//! [time, space_x, space_y, role, label_invoice, label_task, label_report, mood, network]
//! ```
//!
//! Missing and unknown attributes encode to 0.0.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Timelike};
use regex::Regex;
use serde_json::Value;

use cai_core::constants::ENCODED_DIMENSIONS;
use cai_core::errors::EncodeError;
use cai_core::models::Payload;

static CLOCK_TIME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").ok());

const DEFAULT_SPACE: [f64; 2] = [0.0, 0.0];
const DEFAULT_LABEL: [f64; 3] = [0.0, 0.0, 0.0];

/// Maps semantic context attributes to a fixed-length numeric vector.
#[derive(Debug, Clone)]
pub struct ContextEncoder {
    time_map: HashMap<&'static str, f64>,
    space_map: HashMap<&'static str, [f64; 2]>,
    role_map: HashMap<&'static str, f64>,
    label_map: HashMap<&'static str, [f64; 3]>,
    mood_map: HashMap<&'static str, f64>,
}

impl ContextEncoder {
    pub fn new() -> Self {
        Self {
            time_map: HashMap::from([
                ("morning", 0.2),
                ("before lunch", 0.3),
                ("afternoon", 0.6),
                ("evening", 0.8),
                ("night", 1.0),
            ]),
            space_map: HashMap::from([
                ("around the house", [0.1, 0.2]),
                ("at office", [0.5, 0.6]),
                ("warehouse", [0.8, 0.9]),
            ]),
            role_map: HashMap::from([("admin", 1.0), ("user", 0.5), ("guest", 0.2)]),
            label_map: HashMap::from([
                ("invoice", [1.0, 0.0, 0.0]),
                ("task", [0.0, 1.0, 0.0]),
                ("report", [0.0, 0.0, 1.0]),
            ]),
            mood_map: HashMap::from([("happy", 0.1), ("neutral", 0.5), ("stressed", 0.9)]),
        }
    }

    /// Output dimensionality.
    pub fn dimensions(&self) -> usize {
        ENCODED_DIMENSIONS
    }

    /// Encode a context payload.
    ///
    /// Fails only when a known attribute holds a non-string value.
    pub fn encode(&self, context: &Payload) -> Result<Vec<f64>, EncodeError> {
        let mut vector = Vec::with_capacity(ENCODED_DIMENSIONS);

        let time = text_attr(context, "time")?
            .and_then(|t| self.time_bucket(&t))
            .and_then(|bucket| self.time_map.get(bucket).copied())
            .unwrap_or(0.0);
        vector.push(time);

        let space_text = match text_attr(context, "space")? {
            Some(s) => Some(s),
            None => text_attr(context, "location")?,
        };
        let space = space_text
            .and_then(|s| space_bucket(&s))
            .and_then(|bucket| self.space_map.get(bucket).copied())
            .unwrap_or(DEFAULT_SPACE);
        vector.extend_from_slice(&space);

        vector.push(lookup(&self.role_map, text_attr(context, "role")?).unwrap_or(0.0));

        let label = lookup(&self.label_map, text_attr(context, "label")?).unwrap_or(DEFAULT_LABEL);
        vector.extend_from_slice(&label);

        vector.push(lookup(&self.mood_map, text_attr(context, "mood")?).unwrap_or(0.0));

        vector.push(
            text_attr(context, "network")?
                .map(|node| network_hash(&node))
                .unwrap_or(0.0),
        );

        Ok(vector)
    }

    /// Resolve a time attribute to one of the named buckets.
    ///
    /// Accepts a bucket name, a `HH:MM[:SS]` clock time, or an RFC 3339 timestamp.
    fn time_bucket(&self, value: &str) -> Option<&'static str> {
        if let Some((name, _)) = self.time_map.get_key_value(value.to_lowercase().as_str()) {
            return Some(*name);
        }
        if let Some(caps) = CLOCK_TIME.as_ref().and_then(|re| re.captures(value)) {
            let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
            return (hour < 24).then(|| hour_bucket(hour));
        }
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| hour_bucket(dt.hour()))
    }
}

impl Default for ContextEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Hour of day → time bucket.
fn hour_bucket(hour: u32) -> &'static str {
    match hour {
        5..=10 => "morning",
        11 => "before lunch",
        12..=16 => "afternoon",
        17..=20 => "evening",
        _ => "night",
    }
}

/// Free-text location → space bucket. "warehouse" is checked before "house".
fn space_bucket(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    if text.contains("warehouse") || text.contains("depot") {
        Some("warehouse")
    } else if text.contains("office") {
        Some("at office")
    } else if text.contains("house") || text.contains("home") {
        Some("around the house")
    } else {
        None
    }
}

/// Network node id → stable value in [0, 1).
fn network_hash(node_id: &str) -> f64 {
    if node_id.is_empty() {
        return 0.0;
    }
    let hash = blake3::hash(node_id.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    (u64::from_le_bytes(prefix) % 1000) as f64 / 1000.0
}

fn lookup<T: Copy>(map: &HashMap<&'static str, T>, key: Option<String>) -> Option<T> {
    key.and_then(|k| map.get(k.to_lowercase().as_str()).copied())
}

/// Read a trimmed string attribute.
/// Absent and null attributes are `None`; other non-string types are an error.
fn text_attr(context: &Payload, attribute: &str) -> Result<Option<String>, EncodeError> {
    match context.get(attribute) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(EncodeError::InvalidAttribute {
            attribute: attribute.to_string(),
            found: value_kind(other).to_string(),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
