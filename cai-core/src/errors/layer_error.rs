/// Layer traversal errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayerError {
    #[error("layer nesting exceeds maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}
