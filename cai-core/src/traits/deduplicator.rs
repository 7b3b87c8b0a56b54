use crate::models::ContextRecord;

/// Collapses near-duplicate records in a batch.
pub trait IDeduplicator: Send + Sync {
    /// Return a batch in which every input is represented by exactly one output.
    fn deduplicate(&self, records: &[ContextRecord]) -> Vec<ContextRecord>;
}
