/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of dimensions produced by the context encoder.
pub const ENCODED_DIMENSIONS: usize = 9;

/// Maximum nesting depth accepted when walking context layers.
pub const MAX_LAYER_DEPTH: usize = 32;

/// Category key returned when no candidate matches.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "uncategorized";

/// Reserved key carrying a nested layer's declared weight.
pub const LAYER_WEIGHT_KEY: &str = "@weight";

/// Reserved key carrying a nested layer's declared trust.
pub const LAYER_TRUST_KEY: &str = "@trust";

/// Separator used when joining member contents in a fused context.
pub const CONTENT_SEPARATOR: &str = " | ";
