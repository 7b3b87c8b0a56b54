use std::thread;
use std::time::Duration;

use cai_core::models::Payload;
use cai_session::ContextManager;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rayon::prelude::*;
use serde_json::json;

fn payload(value: serde_json::Value) -> Payload {
    value.as_object().cloned().unwrap()
}

#[test]
fn value_expires_after_ttl_but_history_remains() {
    let m = ContextManager::new();
    m.update_context("sensor", payload(json!({"temp": 21})), Some(Duration::from_millis(50)));
    assert_eq!(m.get("sensor"), payload(json!({"temp": 21})));

    thread::sleep(Duration::from_millis(120));
    assert!(m.get("sensor").is_empty());
    assert_eq!(m.get_history("sensor").len(), 1);
}

#[test]
fn history_accumulates_in_order() {
    let m = ContextManager::new();
    m.update_context("k", payload(json!({"v": 1})), None);
    m.update_context("k", payload(json!({"v": 2})), None);

    let history = m.get_history("k");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].data, payload(json!({"v": 1})));
    assert_eq!(history[1].data, payload(json!({"v": 2})));
    assert!(history[0].timestamp <= history[1].timestamp);
    assert_eq!(m.get("k"), payload(json!({"v": 2})));
}

#[test]
fn concurrent_updates_are_all_recorded() {
    let m = ContextManager::new();
    (0..200).into_par_iter().for_each(|i| {
        let key = format!("k{}", i % 4);
        m.update_context(&key, payload(json!({ "i": i })), None);
    });

    assert_eq!(m.len(), 4);
    let total: usize = m.keys().iter().map(|k| m.get_history(k).len()).sum();
    assert_eq!(total, 200);
    for key in m.keys() {
        let history = m.get_history(&key);
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(m.get(&key), history.last().unwrap().data);
    }
}

#[test]
fn clones_share_state() {
    let m = ContextManager::new();
    let handle = m.clone();
    let t = thread::spawn(move || handle.update_context("shared", payload(json!({"x": 1})), None));
    t.join().unwrap();
    assert_eq!(m.get("shared"), payload(json!({"x": 1})));
}

#[test]
fn global_instance_is_shared() {
    ContextManager::global().assign_role("global-user", "admin");
    assert_eq!(
        ContextManager::global().get_role("global-user").as_deref(),
        Some("admin")
    );
}

proptest! {
    #[test]
    fn history_keeps_every_update_in_order(
        updates in prop::collection::vec((0usize..3, 0i64..1000), 1..40)
    ) {
        let m = ContextManager::new();
        let start = Utc.with_ymd_and_hms(2025, 5, 21, 9, 0, 0).unwrap();
        let keys = ["a", "b", "c"];
        for (seq, (k, v)) in updates.iter().enumerate() {
            let at = start + chrono::Duration::seconds(seq as i64);
            m.update_context_at(keys[*k], payload(json!({ "v": v })), None, at);
        }

        for (k, key) in keys.iter().enumerate() {
            let expected: Vec<Payload> = updates
                .iter()
                .filter(|(i, _)| *i == k)
                .map(|(_, v)| payload(json!({ "v": v })))
                .collect();
            let history = m.get_history(key);
            prop_assert_eq!(history.len(), expected.len());
            prop_assert!(history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
            let data: Vec<Payload> = history.into_iter().map(|h| h.data).collect();
            prop_assert_eq!(&data, &expected);
            prop_assert_eq!(m.get_at(key, start), expected.last().cloned().unwrap_or_default());
        }
    }

    #[test]
    fn value_is_visible_only_before_expiry(ttl_secs in 1u64..600, probe_secs in 0i64..1200) {
        let m = ContextManager::new();
        let start = Utc.with_ymd_and_hms(2025, 5, 21, 9, 0, 0).unwrap();
        m.update_context_at("k", payload(json!({"x": 1})), Some(Duration::from_secs(ttl_secs)), start);

        let at = start + chrono::Duration::seconds(probe_secs);
        prop_assert_eq!(m.get_at("k", at).is_empty(), probe_secs >= ttl_secs as i64);
        prop_assert_eq!(m.get_history("k").len(), 1);
    }
}
