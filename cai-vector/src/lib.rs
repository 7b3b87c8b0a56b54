//! # cai-vector
//!
//! Vector primitives for similarity scoring:
//! - [`ContextEncoder`] maps a context payload to a fixed 9-dimension vector
//! - [`VectorComparer`] computes weighted cosine similarity and Euclidean distance
//! - [`FullVectorComparer`] compares whole contexts, scaled by trust
//! - [`EncodingCache`] memoizes encodings by payload content hash
//! - [`text`] provides normalized edit similarity for strings

pub mod cache;
pub mod comparer;
pub mod encoder;
pub mod full_comparer;
pub mod text;

pub use cache::EncodingCache;
pub use comparer::VectorComparer;
pub use encoder::ContextEncoder;
pub use full_comparer::FullVectorComparer;
