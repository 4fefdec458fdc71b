use thiserror::Error;

/// Startup failures. Request-level problems are answered with JSON error
/// bodies instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("encoder '{0}' is not available in this build")]
    EncoderUnavailable(String),

    #[error(transparent)]
    Retrieval(#[from] kalakaart_retrieval::Error),

    #[error(transparent)]
    Assistant(#[from] kalakaart_assistant::AssistantError),
}

pub type Result<T> = std::result::Result<T, ApiError>;
