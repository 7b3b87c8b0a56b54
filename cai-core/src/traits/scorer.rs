use crate::models::ContextRecord;

/// Scores a context record for relevance ranking.
pub trait IContextScorer: Send + Sync {
    fn score(&self, record: &ContextRecord) -> f64;
}
