use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot '{0}' not found")]
    SnapshotNotFound(String),

    #[error("snapshot '{name}' is corrupt: {reason}")]
    Corrupt { name: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;
