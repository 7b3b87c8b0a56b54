//! # cai-core
//!
//! Foundation crate for the context fusion engine.
//! Defines the record/layer/category models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CaiConfig;
pub use errors::{CaiError, CaiResult};
pub use models::{
    CandidateCategory, Confidence, ContextLayer, ContextRecord, FusedContext, LayerNode, Payload,
    TimeSpan,
};
