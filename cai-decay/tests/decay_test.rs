use cai_core::models::{ContextRecord, Payload};
use cai_core::traits::IContextScorer;
use cai_decay::TimeDecayScorer;
use chrono::{Duration, Utc};
use proptest::prelude::*;
use serde_json::json;

fn scored(score: f64) -> ContextRecord {
    let mut payload = Payload::new();
    payload.insert("score".into(), json!(score));
    ContextRecord::new(payload)
}

#[test]
fn ten_seconds_at_unit_rate() {
    let now = Utc::now();
    let scorer = TimeDecayScorer::new("score", 1.0);
    let fresh = scored(1.0).with_timestamp(now);
    let old = scored(1.0).with_timestamp(now - Duration::seconds(10));

    assert!((scorer.score_at(&fresh, now) - 1.0).abs() < 1e-12);
    assert!((scorer.score_at(&old, now) - (-10.0f64).exp()).abs() < 1e-12);
}

#[test]
fn trait_score_uses_current_time() {
    let scorer = TimeDecayScorer::new("score", 0.01);
    let record = scored(0.8).with_timestamp(Utc::now() - Duration::seconds(100));
    let s = scorer.score(&record);
    assert!(s < 0.8 && s > 0.8 * (-1.5f64).exp());
}

#[test]
fn rank_orders_by_decayed_score() {
    let now = Utc::now();
    let scorer = TimeDecayScorer::new("score", 0.1);
    let records = vec![
        scored(1.0).with_id("old").with_timestamp(now - Duration::seconds(60)),
        scored(0.5).with_id("fresh").with_timestamp(now),
        scored(0.5).with_id("untimed"),
    ];
    let ranked = scorer.rank(&records, now);
    let ids: Vec<&str> = ranked.iter().map(|(r, _)| r.id.as_str()).collect();
    assert_eq!(ids, vec!["fresh", "untimed", "old"]);

    let scores = scorer.score_batch(&records, now);
    assert_eq!(scores.len(), 3);
    assert_eq!(scores[1], 0.5);
}

proptest! {
    #[test]
    fn older_never_scores_higher(
        base in 0.0f64..100.0,
        rate in 0.0f64..2.0,
        younger in 0i64..10_000,
        extra in 0i64..10_000,
    ) {
        let now = Utc::now();
        let scorer = TimeDecayScorer::new("score", rate);
        let a = scored(base).with_timestamp(now - Duration::seconds(younger));
        let b = scored(base).with_timestamp(now - Duration::seconds(younger + extra));
        prop_assert!(scorer.score_at(&b, now) <= scorer.score_at(&a, now));
    }

    #[test]
    fn decayed_score_never_exceeds_base(base in 0.0f64..100.0, age in -1000i64..100_000) {
        let now = Utc::now();
        let scorer = TimeDecayScorer::default();
        let record = scored(base).with_timestamp(now - Duration::seconds(age));
        prop_assert!(scorer.score_at(&record, now) <= base);
    }
}
