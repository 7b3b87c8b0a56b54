use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cai_core::models::{CandidateCategory, ContextRecord};
use cai_pipeline::ContextPipeline;
use serde_json::json;
use test_fixtures::{candidate, record_at};

const ROLES: [&str; 3] = ["admin", "user", "guest"];
const LABELS: [&str; 3] = ["invoice", "task", "report"];

/// 1K records, one every second, with a repeating payload pattern so
/// neighbours inside the window are duplicates.
fn build_batch(n: usize) -> Vec<ContextRecord> {
    (0..n)
        .map(|i| {
            record_at(
                &format!("r{i}"),
                json!({
                    "role": ROLES[i % 3],
                    "label": LABELS[(i / 3) % 3],
                    "note": format!("event {}", i / 2),
                }),
                i as i64,
            )
        })
        .collect()
}

fn build_candidates() -> Vec<CandidateCategory> {
    LABELS
        .iter()
        .flat_map(|label| {
            ROLES.iter().map(move |role| {
                candidate(&format!("{role}-{label}"), json!({"role": role, "label": label}), 1.0)
            })
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let batch = build_batch(1_000);
    let candidates = build_candidates();
    let pipeline = ContextPipeline::default();

    c.bench_function("pipeline_1k_records", |b| {
        b.iter(|| pipeline.run(black_box(&batch), black_box(&candidates)))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
