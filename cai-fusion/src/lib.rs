//! # cai-fusion
//!
//! Collapses each category's records into one [`FusedContext`](cai_core::FusedContext).

pub mod fuser;
pub mod payload;

pub use fuser::Fuser;
