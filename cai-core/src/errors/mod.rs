mod config_error;
mod encode_error;
mod layer_error;
mod vector_error;

pub use config_error::ConfigError;
pub use encode_error::EncodeError;
pub use layer_error::LayerError;
pub use vector_error::VectorError;

/// Top-level error for the context fusion engine.
///
/// Pipeline stages never fail on malformed records; these conditions surface
/// only from direct calls (vector comparison, encoding, config loading).
#[derive(Debug, thiserror::Error)]
pub enum CaiError {
    #[error("vector error: {0}")]
    VectorError(#[from] VectorError),

    #[error("encode error: {0}")]
    EncodeError(#[from] EncodeError),

    #[error("layer error: {0}")]
    LayerError(#[from] LayerError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result alias used across the workspace.
pub type CaiResult<T> = Result<T, CaiError>;
