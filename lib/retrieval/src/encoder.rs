use crate::{Error, Result, Vector};
use sha2::{Digest, Sha256};

pub const DEFAULT_HASHING_DIM: usize = 384;
pub const MIN_HASHING_DIM: usize = 8;
pub const MAX_HASHING_DIM: usize = 4096;

/// Turns text into fixed-size dense vectors.
///
/// Documents and queries must go through the same encoder; the
/// [`signature`](Encoder::signature) identifies the vector space so that a
/// persisted index is never queried with a different encoder.
pub trait Encoder: Send + Sync {
    fn name(&self) -> &str;

    fn dim(&self) -> usize;

    fn encode(&self, text: &str) -> Result<Vector>;

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        texts.iter().map(|t| self.encode(t)).collect()
    }

    fn signature(&self) -> String {
        format!("{}/{}", self.name(), self.dim())
    }
}

/// Deterministic encoder that hashes character trigrams and word tokens.
///
/// Works on Unicode scalar values, so Devanagari, Tamil and Telugu text get
/// the same treatment as Latin text. Needs no model download.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dim: usize,
}

impl HashingEncoder {
    pub fn new(dim: usize) -> Result<Self> {
        if !(MIN_HASHING_DIM..=MAX_HASHING_DIM).contains(&dim) {
            return Err(Error::Encoder(format!(
                "hashing dimension {} is outside {}..={}",
                dim, MIN_HASHING_DIM, MAX_HASHING_DIM
            )));
        }
        Ok(Self { dim })
    }

    /// Buckets must not change between processes, or saved indexes go stale
    fn bucket(&self, token: &str) -> usize {
        let digest = Sha256::digest(token.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        (u64::from_le_bytes(head) % self.dim as u64) as usize
    }

    fn words(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation() || c == '।')
            .filter(|w| !w.is_empty())
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self { dim: DEFAULT_HASHING_DIM }
    }
}

impl Encoder for HashingEncoder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn encode(&self, text: &str) -> Result<Vector> {
        let mut vector = Vector::zeros(self.dim);
        let normalized = text.to_lowercase();
        let slots = vector.as_mut_slice();

        for word in Self::words(&normalized) {
            // Words contribute more than their trigrams
            slots[self.bucket(word)] += 2.0;

            let chars: Vec<char> = format!(" {} ", word).chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                slots[self.bucket(&trigram)] += 1.0;
            }
        }

        vector.normalize();
        Ok(vector)
    }
}
