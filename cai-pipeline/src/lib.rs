//! # cai-pipeline
//!
//! Batch orchestration: deduplicate, categorize each survivor, group by
//! category, and fuse each group.

pub mod pipeline;
pub mod report;

pub use pipeline::ContextPipeline;
pub use report::{PipelineReport, PipelineStats};
