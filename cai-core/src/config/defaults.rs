//! Default values for every config section.

// Deduplication
pub const DEFAULT_TIME_THRESHOLD_SECS: f64 = 5.0;
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

// Vector comparison
pub const DEFAULT_VECTOR_WEIGHTS: [f64; 9] = [1.5, 1.0, 1.0, 1.3, 1.2, 1.2, 1.2, 0.8, 1.0];
pub const DEFAULT_ENCODING_CACHE_CAPACITY: u64 = 10_000;

// Categorization
pub const DEFAULT_MIN_SCORE: f64 = 0.0;
pub const DEFAULT_LEAF_TOLERANCE: f64 = 0.8;

// Decay
pub const DEFAULT_BASE_SCORE_KEY: &str = "score";
pub const DEFAULT_DECAY_RATE: f64 = 0.01;

// Trust
pub const DEFAULT_FIXED_TRUST: f64 = 1.0;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
