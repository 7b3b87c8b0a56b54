//! # cai-decay
//!
//! Relevance scoring that decays exponentially with record age.

pub mod scorer;

pub use scorer::TimeDecayScorer;
