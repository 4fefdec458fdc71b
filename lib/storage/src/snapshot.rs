// Compressed snapshots of the retrieval index
use crate::error::{Result, StorageError};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use kalakaart_retrieval::RetrievalIndex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SNAPSHOT_PREFIX: &str = "retrieval";
const SNAPSHOT_EXTENSION: &str = "snapshot";

/// Snapshot description for logs and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDescription {
    pub name: String,
    pub creation_time: Option<String>,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    created_at: DateTime<Utc>,
    index: &'a RetrievalIndex,
}

#[derive(Deserialize)]
struct SnapshotData {
    #[allow(dead_code)]
    created_at: DateTime<Utc>,
    index: RetrievalIndex,
}

/// Directory of gzip-compressed JSON snapshots, newest name last
pub struct SnapshotStore {
    snapshot_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(snapshot_dir: P) -> Result<Self> {
        let snapshot_dir = snapshot_dir.as_ref().to_path_buf();
        fs::create_dir_all(&snapshot_dir)?;
        Ok(Self { snapshot_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Timestamped names sort in creation order
    fn generate_snapshot_name(now: DateTime<Utc>) -> String {
        format!(
            "{}-{}.{}",
            SNAPSHOT_PREFIX,
            now.format("%Y-%m-%dT%H-%M-%S%.9f"),
            SNAPSHOT_EXTENSION
        )
    }

    /// Write `index` as a new snapshot. The file appears atomically.
    pub fn save(&self, index: &RetrievalIndex) -> Result<SnapshotDescription> {
        let now = Utc::now();
        let name = Self::generate_snapshot_name(now);
        let path = self.snapshot_dir.join(&name);

        let json = serde_json::to_vec(&SnapshotRef { created_at: now, index })?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json)?;
        let compressed = encoder.finish()?;
        let checksum = format!("{:x}", Sha256::digest(&compressed));

        AtomicFile::new(&path, OverwriteBehavior::DisallowOverwrite)
            .write(|f| f.write_all(&compressed))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => StorageError::Io(e),
            })?;

        info!(
            "Saved retrieval snapshot {} ({} documents, {} bytes)",
            name,
            index.len(),
            compressed.len()
        );
        Ok(SnapshotDescription {
            name,
            creation_time: Some(now.to_rfc3339()),
            size: compressed.len() as u64,
            checksum: Some(checksum),
        })
    }

    /// All snapshots, newest first
    pub fn list(&self) -> Result<Vec<SnapshotDescription>> {
        let mut snapshots = Vec::new();
        for entry in fs::read_dir(&self.snapshot_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let metadata = fs::metadata(&path)?;
            let file_data = fs::read(&path)?;
            let creation_time = metadata
                .created()
                .or_else(|_| metadata.modified())
                .ok()
                .map(|t| DateTime::<Utc>::from(t).to_rfc3339());

            snapshots.push(SnapshotDescription {
                name: name.to_string(),
                creation_time,
                size: metadata.len(),
                checksum: Some(format!("{:x}", Sha256::digest(&file_data))),
            });
        }

        snapshots.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(snapshots)
    }

    pub fn load(&self, name: &str) -> Result<RetrievalIndex> {
        let path = self.snapshot_dir.join(name);
        if !path.is_file() {
            return Err(StorageError::SnapshotNotFound(name.to_string()));
        }

        let corrupt = |reason: String| StorageError::Corrupt { name: name.to_string(), reason };
        let compressed = fs::read(&path)?;
        let mut json = Vec::new();
        GzDecoder::new(compressed.as_slice())
            .read_to_end(&mut json)
            .map_err(|e| corrupt(e.to_string()))?;
        let data: SnapshotData = serde_json::from_slice(&json).map_err(|e| corrupt(e.to_string()))?;

        debug!("Loaded retrieval snapshot {} ({} documents)", name, data.index.len());
        Ok(data.index)
    }

    /// The newest snapshot that decodes; corrupt files are skipped
    pub fn load_latest(&self) -> Result<Option<RetrievalIndex>> {
        for snapshot in self.list()? {
            match self.load(&snapshot.name) {
                Ok(index) => return Ok(Some(index)),
                Err(StorageError::Corrupt { name, reason }) => {
                    warn!("Skipping corrupt snapshot {}: {}", name, reason);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    /// Delete all but the `keep` newest snapshots; returns how many were removed
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let mut removed = 0;
        for snapshot in self.list()?.into_iter().skip(keep) {
            fs::remove_file(self.snapshot_dir.join(&snapshot.name))?;
            removed += 1;
        }
        if removed > 0 {
            debug!("Pruned {} old snapshots", removed);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalakaart_core::Language;
    use kalakaart_retrieval::{HashingEncoder, RetrievalDocument};
    use tempfile::tempdir;

    fn index() -> RetrievalIndex {
        let encoder = HashingEncoder::new(64).unwrap();
        RetrievalIndex::build(
            &encoder,
            vec![
                RetrievalDocument::knowledge(Language::English, "Blue pottery from Jaipur"),
                RetrievalDocument::knowledge(Language::English, "Madhubani painting from Bihar"),
                RetrievalDocument::knowledge(Language::Hindi, "मिट्टी के बर्तन"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_save_and_load_latest() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        assert!(store.load_latest().unwrap().is_none());

        let original = index();
        let description = store.save(&original).unwrap();
        assert!(description.name.ends_with(".snapshot"));
        assert!(description.size > 0);
        assert_eq!(description.checksum.as_ref().map(|c| c.len()), Some(64));

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].checksum, description.checksum);

        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.len(), original.len());
        assert_eq!(loaded.encoder_signature(), original.encoder_signature());
        assert_eq!(loaded.languages(), original.languages());
    }

    #[test]
    fn test_corrupt_snapshot_is_skipped() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        store.save(&index()).unwrap();

        // Sorts after any real timestamp
        fs::write(dir.path().join("retrieval-9999-01-01T00-00-00.000000000.snapshot"), b"not gzip").unwrap();
        assert!(matches!(
            store.load("retrieval-9999-01-01T00-00-00.000000000.snapshot"),
            Err(StorageError::Corrupt { .. })
        ));

        let loaded = store.load_latest().unwrap().unwrap();
        assert_eq!(loaded.len(), 3);
    }

    #[test]
    fn test_missing_snapshot() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        assert!(matches!(store.load("nope.snapshot"), Err(StorageError::SnapshotNotFound(_))));
    }

    #[test]
    fn test_prune_keeps_newest() {
        let dir = tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        let first = store.save(&index()).unwrap();
        let second = store.save(&index()).unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        assert_eq!(store.prune(1).unwrap(), 1);
        let remaining = store.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, second.name);
        assert_ne!(first.name, second.name);
        assert!(dir.path().join("notes.txt").exists());
    }
}
