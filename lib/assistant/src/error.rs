use thiserror::Error;

/// Errors raised while answering a chat message
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message is empty or whitespace-only")]
    EmptyMessage,

    /// A built-in pattern failed to compile
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    #[error("retrieval error: {0}")]
    Retrieval(#[from] kalakaart_retrieval::Error),

    #[error("unknown classifier strategy: {0}")]
    UnknownClassifier(String),
}

pub type Result<T> = std::result::Result<T, AssistantError>;
