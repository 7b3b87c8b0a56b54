use cai_core::config::ObservabilityConfig;
use cai_observability::{dedup_span, fusion_span, init_tracing, names, pipeline_span};

#[test]
fn init_is_idempotent() {
    let config = ObservabilityConfig::default();
    init_tracing(&config);
    init_tracing(&config);
    tracing::info!("still logging");
}

#[test]
fn spans_carry_their_names() {
    init_tracing(&ObservabilityConfig::default());
    let span = pipeline_span!(10usize, 3usize);
    if let Some(meta) = span.metadata() {
        assert_eq!(meta.name(), names::PIPELINE);
    }
    let _guard = dedup_span!(4usize).entered();
    let fusion = fusion_span!(2usize);
    if let Some(meta) = fusion.metadata() {
        assert_eq!(meta.name(), names::FUSION);
    }
}
