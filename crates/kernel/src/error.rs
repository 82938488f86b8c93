use gridwave_common::DimsError;

/// Errors from building a grid animator or loading its configuration.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("invalid grid size: {0}")]
    Dims(#[from] DimsError),

    #[error("initial scale must be positive and finite, got {0}")]
    NonPositiveScale(f32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),
}
