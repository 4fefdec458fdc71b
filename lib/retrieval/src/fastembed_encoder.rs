use crate::{Encoder, Error, Result, Vector};
use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use parking_lot::Mutex;

/// Sentence encoder backed by `fastembed`.
///
/// Keeps a single `TextEmbedding` behind a `Mutex` so the loaded model is
/// shared by all request workers.
pub struct FastEmbedEncoder {
    label: String,
    dim: usize,
    inner: Mutex<TextEmbedding>,
}

impl FastEmbedEncoder {
    /// Multilingual MiniLM, covering English and the Indic scripts we detect
    pub fn multilingual() -> Result<Self> {
        Self::try_new(EmbeddingModel::ParaphraseMLMiniLML12V2)
    }

    pub fn try_new(model: EmbeddingModel) -> Result<Self> {
        let info = TextEmbedding::get_model_info(&model)
            .map_err(|e| Error::Encoder(format!("unable to read model metadata: {}", e)))?;
        let label = info.model_code.clone();
        let dim = info.dim;

        let embedding = TextEmbedding::try_new(TextInitOptions::new(model))
            .map_err(|e| Error::Encoder(format!("failed to initialise `{}`: {}", label, e)))?;

        tracing::info!("Loaded sentence encoder {} ({} dimensions)", label, dim);
        Ok(Self { label, dim, inner: Mutex::new(embedding) })
    }
}

impl Encoder for FastEmbedEncoder {
    fn name(&self) -> &str {
        &self.label
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn encode(&self, text: &str) -> Result<Vector> {
        let mut vectors = self.encode_batch(&[text])?;
        vectors
            .pop()
            .ok_or_else(|| Error::Encoder("no embedding returned".to_string()))
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        let mut model = self.inner.lock();
        let embeddings = model
            .embed(texts.to_vec(), None)
            .map_err(|e| Error::Encoder(format!("inference failed: {}", e)))?;

        embeddings
            .into_iter()
            .map(|v| {
                if v.len() != self.dim {
                    return Err(Error::DimensionMismatch { expected: self.dim, actual: v.len() });
                }
                Ok(Vector::new(v))
            })
            .collect()
    }
}
