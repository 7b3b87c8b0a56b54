//! # cai-categorize
//!
//! Assigns each record to the candidate category whose template context it
//! matches best, scaled by the candidate's base weight and by trust.

pub mod categorizer;
pub mod layers;

pub use categorizer::{CategoryScore, Categorizer};
pub use layers::LayerComparer;
