//! # cai-session
//!
//! Keyed context cache shared across threads. Values may expire; the update
//! history of a key never does.

pub mod entry;
pub mod manager;

pub use entry::{CacheEntry, HistoryEntry};
pub use manager::ContextManager;
