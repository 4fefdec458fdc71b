use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Artist not found: {0}")]
    ArtistNotFound(String),

    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    #[error("Malformed row {line}: {reason}")]
    RowParse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
