use crate::models::ContextRecord;

/// Decides how two duplicate records combine.
///
/// `existing` is the record already accepted for the group; `incoming` is the
/// newly matched one. Implementations return a new record and must not rely on
/// mutating either input.
pub trait IMergeRule: Send + Sync {
    fn merge(&self, existing: &ContextRecord, incoming: &ContextRecord) -> ContextRecord;
}

impl<F> IMergeRule for F
where
    F: Fn(&ContextRecord, &ContextRecord) -> ContextRecord + Send + Sync,
{
    fn merge(&self, existing: &ContextRecord, incoming: &ContextRecord) -> ContextRecord {
        self(existing, incoming)
    }
}
