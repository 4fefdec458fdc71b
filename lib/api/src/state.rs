use crate::config::{EncoderKind, ServerConfig};
use crate::error::{ApiError, Result};
use kalakaart_assistant::{Assistant, ClassifierKind, IntentClassifier, PatternClassifier, PrototypeClassifier};
use kalakaart_core::{Catalog, DatasetStats, RecordStore};
use kalakaart_retrieval::corpus::{builtin_documents, documents_from_store, load_knowledge_file};
use kalakaart_retrieval::{Encoder, HashingEncoder, Retriever};
use kalakaart_storage::SnapshotStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Snapshots kept after a successful save
const SNAPSHOTS_TO_KEEP: usize = 3;

/// Read-only state shared by every request worker
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub catalog: Catalog,
    pub stats: DatasetStats,
    pub retriever: Arc<Retriever>,
    pub assistant: Assistant,
}

impl AppState {
    /// Load the dataset named in `config` and build everything on top of it
    pub fn build(config: &ServerConfig) -> Result<Self> {
        let store = RecordStore::load(&config.dataset_path);
        Self::from_store(store, config)
    }

    /// Build the index, classifier and assistant over an already loaded store
    pub fn from_store(store: RecordStore, config: &ServerConfig) -> Result<Self> {
        let store = Arc::new(store);
        let encoder = build_encoder(config)?;

        let mut documents = builtin_documents();
        documents.extend(documents_from_store(&store));
        if let Some(path) = &config.knowledge_file {
            documents.extend(load_knowledge_file(path)?);
        }

        let retriever = Arc::new(build_retriever(encoder.clone(), documents, config.index_dir.as_deref())?);

        let classifier: Box<dyn IntentClassifier> = match config.classifier {
            ClassifierKind::Pattern => Box::new(PatternClassifier::new()?),
            ClassifierKind::Prototype => Box::new(PrototypeClassifier::new(encoder)?),
        };
        let assistant = Assistant::new(store.clone(), classifier).with_retriever(retriever.clone());
        info!(
            "Assistant ready: {} artisans, {} retrieval documents, {} classifier",
            store.len(),
            retriever.index().len(),
            assistant.classifier_name()
        );

        Ok(Self {
            catalog: Catalog::from_store(&store),
            stats: DatasetStats::from_store(&store),
            store,
            retriever,
            assistant,
        })
    }
}

fn build_encoder(config: &ServerConfig) -> Result<Arc<dyn Encoder>> {
    match config.encoder {
        EncoderKind::Hashing => Ok(Arc::new(HashingEncoder::new(config.hashing_dim)?)),
        EncoderKind::FastEmbed => fastembed_encoder(),
    }
}

#[cfg(feature = "fastembed")]
fn fastembed_encoder() -> Result<Arc<dyn Encoder>> {
    Ok(Arc::new(kalakaart_retrieval::FastEmbedEncoder::multilingual()?))
}

#[cfg(not(feature = "fastembed"))]
fn fastembed_encoder() -> Result<Arc<dyn Encoder>> {
    Err(ApiError::EncoderUnavailable("fastembed".to_string()))
}

/// Reuse the newest snapshot when it was built by the same encoder, otherwise
/// encode the corpus and snapshot the result. Snapshot problems only cost the
/// reuse; they never stop the server.
fn build_retriever(
    encoder: Arc<dyn Encoder>,
    documents: Vec<kalakaart_retrieval::RetrievalDocument>,
    index_dir: Option<&Path>,
) -> Result<Retriever> {
    let Some(dir) = index_dir else {
        return Ok(Retriever::build(encoder, documents)?);
    };

    let snapshots = match SnapshotStore::new(dir) {
        Ok(snapshots) => snapshots,
        Err(e) => {
            warn!("Snapshot directory {:?} unavailable: {}", dir, e);
            return Ok(Retriever::build(encoder, documents)?);
        }
    };

    match snapshots.load_latest() {
        Ok(Some(index)) if index.encoder_signature() == encoder.signature() => {
            info!("Loaded retrieval index from snapshot in {:?}", dir);
            return Ok(Retriever::from_index(encoder, index)?);
        }
        Ok(Some(index)) => info!(
            "Snapshot was built with {}, current encoder is {}; rebuilding",
            index.encoder_signature(),
            encoder.signature()
        ),
        Ok(None) => info!("No retrieval snapshot in {:?}; building index", dir),
        Err(e) => warn!("Failed to read snapshots: {}", e),
    }

    let retriever = Retriever::build(encoder, documents)?;
    match snapshots.save(retriever.index()) {
        Ok(description) => {
            info!("Saved {} ({} bytes)", description.name, description.size);
            if let Err(e) = snapshots.prune(SNAPSHOTS_TO_KEEP) {
                warn!("Failed to prune old snapshots: {}", e);
            }
        }
        Err(e) => warn!("Failed to save retrieval snapshot: {}", e),
    }
    Ok(retriever)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CSV: &str = "id,name,gender,age,craft_type,state,district,village,languages,email,phone,phone_available,government_id,cluster_code\n\
        1,Asha,Female,34,Pottery,Gujarat,Kutch,Bhuj,\"Gujarati,Hindi\",,9876543210,Yes,G1,C1\n\
        2,Ravi,Male,52,Weaving,Rajasthan,Barmer,,Hindi,,,No,G2,C2\n";

    fn store() -> RecordStore {
        RecordStore::parse(CSV).unwrap()
    }

    #[test]
    fn test_from_store() {
        let state = AppState::from_store(store(), &ServerConfig::default()).unwrap();
        assert_eq!(state.store.len(), 2);
        assert_eq!(state.stats.total_artists, 2);
        assert_eq!(state.catalog.crafts, vec!["Pottery", "Weaving"]);
        assert!(!state.retriever.index().is_empty());
        assert_eq!(state.assistant.classifier_name(), "pattern");
    }

    #[test]
    fn test_prototype_classifier_is_selectable() {
        let config = ServerConfig { classifier: ClassifierKind::Prototype, ..Default::default() };
        let state = AppState::from_store(store(), &config).unwrap();
        assert_eq!(state.assistant.classifier_name(), "prototype");
    }

    #[cfg(not(feature = "fastembed"))]
    #[test]
    fn test_fastembed_requires_feature() {
        let config = ServerConfig { encoder: EncoderKind::FastEmbed, ..Default::default() };
        let err = AppState::from_store(store(), &config).err().unwrap();
        assert!(matches!(err, ApiError::EncoderUnavailable(_)));
    }

    #[test]
    fn test_out_of_range_hashing_dim_is_fatal() {
        let config = ServerConfig { hashing_dim: 100_000, ..Default::default() };
        assert!(matches!(AppState::from_store(store(), &config), Err(ApiError::Retrieval(_))));
    }

    #[test]
    fn test_missing_knowledge_file_is_fatal() {
        let config = ServerConfig {
            knowledge_file: Some("/definitely/not/here.json".into()),
            ..Default::default()
        };
        assert!(matches!(AppState::from_store(store(), &config), Err(ApiError::Retrieval(_))));
    }

    #[test]
    fn test_snapshot_is_written_then_reused() {
        let dir = tempdir().unwrap();
        let config = ServerConfig { index_dir: Some(dir.path().to_path_buf()), ..Default::default() };

        let first = AppState::from_store(store(), &config).unwrap();
        assert_eq!(SnapshotStore::new(dir.path()).unwrap().list().unwrap().len(), 1);

        // A reused snapshot does not write another one
        let second = AppState::from_store(store(), &config).unwrap();
        assert_eq!(second.retriever.index().len(), first.retriever.index().len());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

        // A different encoder dimension forces a rebuild
        let other = ServerConfig { hashing_dim: 128, ..config };
        AppState::from_store(store(), &other).unwrap();
        assert_eq!(SnapshotStore::new(dir.path()).unwrap().list().unwrap().len(), 2);
    }
}
