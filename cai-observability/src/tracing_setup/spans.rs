//! Span definitions per pipeline stage: dedup, categorize, fusion, and the
//! full pipeline run.

/// Create a pipeline span.
#[macro_export]
macro_rules! pipeline_span {
    ($records:expr, $candidates:expr) => {
        tracing::info_span!("cai.pipeline", records = $records, candidates = $candidates)
    };
}

/// Create a deduplication span.
#[macro_export]
macro_rules! dedup_span {
    ($records:expr) => {
        tracing::info_span!("cai.dedup", records = $records)
    };
}

/// Create a categorization span.
#[macro_export]
macro_rules! categorize_span {
    ($records:expr, $candidates:expr) => {
        tracing::info_span!("cai.categorize", records = $records, candidates = $candidates)
    };
}

/// Create a fusion span.
#[macro_export]
macro_rules! fusion_span {
    ($groups:expr) => {
        tracing::info_span!("cai.fusion", groups = $groups)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "cai.pipeline";
    pub const DEDUP: &str = "cai.dedup";
    pub const CATEGORIZE: &str = "cai.categorize";
    pub const FUSION: &str = "cai.fusion";
}
