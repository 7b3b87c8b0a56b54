//! # cai-observability
//!
//! Subscriber setup and span macros shared by every stage.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_filter, spans::names, LOG_ENV_VAR};
