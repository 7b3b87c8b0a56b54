//! # cai-dedup
//!
//! Collapses near-duplicate context records.
//!
//! Two records are compared only when they are close in time. Pairs whose
//! payload similarity reaches the fuzzy threshold are linked, and every
//! connected group is folded into one record through the merge rule.

pub mod deduplicator;
pub mod merge;
pub mod similarity;
mod union_find;

pub use deduplicator::{DedupGroup, Deduplicator};
pub use merge::HigherConfidence;
pub use similarity::{SimilarityStrategy, TextSimilarity, VectorSimilarity};
