pub mod deduplicator;
pub mod merge;
pub mod scorer;
pub mod trust;

pub use deduplicator::IDeduplicator;
pub use merge::IMergeRule;
pub use scorer::IContextScorer;
pub use trust::ITrustProvider;
