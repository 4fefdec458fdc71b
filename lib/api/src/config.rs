use crate::error::ApiError;
use kalakaart_assistant::ClassifierKind;
use kalakaart_retrieval::DEFAULT_HASHING_DIM;
use std::path::PathBuf;
use std::str::FromStr;

/// Which text encoder backs the retrieval index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderKind {
    #[default]
    Hashing,
    FastEmbed,
}

impl FromStr for EncoderKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hashing" | "hash" => Ok(EncoderKind::Hashing),
            "fastembed" => Ok(EncoderKind::FastEmbed),
            other => Err(ApiError::InvalidConfig(format!("unknown encoder '{}'", other))),
        }
    }
}

/// Everything the server needs at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub dataset_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Snapshot directory for the retrieval index; `None` disables snapshots
    pub index_dir: Option<PathBuf>,
    /// Extra training/knowledge JSON merged into the corpus
    pub knowledge_file: Option<PathBuf>,
    pub encoder: EncoderKind,
    pub classifier: ClassifierKind,
    pub hashing_dim: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/artisans.csv"),
            host: "0.0.0.0".to_string(),
            port: 5000,
            index_dir: None,
            knowledge_file: None,
            encoder: EncoderKind::Hashing,
            classifier: ClassifierKind::Pattern,
            hashing_dim: DEFAULT_HASHING_DIM,
        }
    }
}
