use crate::{Encoder, Error, Result, RetrievalDocument, Vector};
use kalakaart_core::Language;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;
use std::sync::Arc;
use tracing::{debug, info};

/// Documents retrieved for the query's own language
pub const PRIMARY_TOP_K: usize = 3;
/// English documents added when the query language is not English
pub const FALLBACK_TOP_K: usize = 2;
const CONTEXT_DOCS: usize = 3;
const CONTEXT_CHARS: usize = 500;

/// A retrieved document with its distance to the query
#[derive(Debug, Clone, Serialize)]
pub struct ScoredDocument {
    #[serde(flatten)]
    pub document: RetrievalDocument,
    /// `1 / (1 + distance)`, in `(0, 1]`
    pub score: f32,
    pub distance: f32,
}

/// Exact (brute force) L2 index over one language's documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageIndex {
    language: Language,
    documents: Vec<RetrievalDocument>,
    vectors: Vec<Vector>,
}

impl LanguageIndex {
    pub fn build(encoder: &dyn Encoder, language: Language, documents: Vec<RetrievalDocument>) -> Result<Self> {
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let vectors = encoder.encode_batch(&texts)?;
        if let Some(bad) = vectors.iter().find(|v| v.dim() != encoder.dim()) {
            return Err(Error::DimensionMismatch { expected: encoder.dim(), actual: bad.dim() });
        }
        Ok(Self { language, documents, vectors })
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[RetrievalDocument] {
        &self.documents
    }

    /// Up to `top_k` nearest documents, ascending by distance
    pub fn search(&self, query: &Vector, top_k: usize) -> Vec<ScoredDocument> {
        let k = top_k.min(self.vectors.len());
        if k == 0 {
            return Vec::new();
        }

        // Max-heap on distance: the root is the worst of the current best k
        let mut heap: BinaryHeap<(OrderedFloat<f32>, usize)> = BinaryHeap::with_capacity(k + 1);
        for (idx, vector) in self.vectors.iter().enumerate() {
            heap.push((OrderedFloat(query.l2_distance(vector)), idx));
            if heap.len() > k {
                heap.pop();
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|(OrderedFloat(distance), idx)| ScoredDocument {
                document: self.documents[idx].clone(),
                score: 1.0 / (1.0 + distance),
                distance,
            })
            .collect()
    }
}

/// All language partitions, tagged with the encoder that produced them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalIndex {
    encoder_signature: String,
    partitions: Vec<LanguageIndex>,
}

impl RetrievalIndex {
    /// Group documents by language and build one partition per non-empty group
    pub fn build(encoder: &dyn Encoder, documents: Vec<RetrievalDocument>) -> Result<Self> {
        let mut partitions = Vec::new();
        for language in Language::ALL {
            let group: Vec<RetrievalDocument> =
                documents.iter().filter(|d| d.language() == language).cloned().collect();
            if group.is_empty() {
                debug!("No documents for {}, skipping partition", language);
                continue;
            }
            info!("Building {} retrieval partition with {} documents", language, group.len());
            partitions.push(LanguageIndex::build(encoder, language, group)?);
        }

        Ok(Self { encoder_signature: encoder.signature(), partitions })
    }

    pub fn encoder_signature(&self) -> &str {
        &self.encoder_signature
    }

    pub fn partition(&self, language: Language) -> Option<&LanguageIndex> {
        self.partitions.iter().find(|p| p.language == language)
    }

    pub fn languages(&self) -> Vec<Language> {
        self.partitions.iter().map(|p| p.language).collect()
    }

    /// Total number of indexed documents across partitions
    pub fn len(&self) -> usize {
        self.partitions.iter().map(LanguageIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An index paired with the encoder used to query it
#[derive(Clone)]
pub struct Retriever {
    encoder: Arc<dyn Encoder>,
    index: RetrievalIndex,
}

impl Retriever {
    pub fn build(encoder: Arc<dyn Encoder>, documents: Vec<RetrievalDocument>) -> Result<Self> {
        let index = RetrievalIndex::build(encoder.as_ref(), documents)?;
        Ok(Self { encoder, index })
    }

    /// Attach a previously built index; fails if it came from another encoder
    pub fn from_index(encoder: Arc<dyn Encoder>, index: RetrievalIndex) -> Result<Self> {
        if index.encoder_signature != encoder.signature() {
            return Err(Error::Encoder(format!(
                "index built with `{}` cannot be queried with `{}`",
                index.encoder_signature,
                encoder.signature()
            )));
        }
        Ok(Self { encoder, index })
    }

    pub fn index(&self) -> &RetrievalIndex {
        &self.index
    }

    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    /// Nearest documents in one partition; a missing partition yields nothing
    pub fn search(&self, query: &str, language: Language, top_k: usize) -> Result<Vec<ScoredDocument>> {
        let Some(partition) = self.index.partition(language) else {
            debug!("No retrieval partition for {}", language);
            return Ok(Vec::new());
        };
        let vector = self.encoder.encode(query)?;
        Ok(partition.search(&vector, top_k))
    }

    /// Search the query's language, then add English results for other languages
    pub fn retrieve(&self, query: &str, language: Language) -> Result<Vec<ScoredDocument>> {
        let mut results = self.search(query, language, PRIMARY_TOP_K)?;
        if language != Language::English {
            results.extend(self.search(query, Language::English, FALLBACK_TOP_K)?);
        }
        Ok(results)
    }
}

impl std::fmt::Debug for Retriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retriever")
            .field("encoder", &self.encoder.signature())
            .field("documents", &self.index.len())
            .finish()
    }
}

/// Joined text of the best documents, cut to a bounded length
pub fn context_from(results: &[ScoredDocument]) -> String {
    let joined = results
        .iter()
        .take(CONTEXT_DOCS)
        .map(|r| r.document.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    joined.chars().take(CONTEXT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashingEncoder;

    fn docs() -> Vec<RetrievalDocument> {
        vec![
            RetrievalDocument::knowledge(Language::English, "Blue pottery from Jaipur uses quartz and glaze"),
            RetrievalDocument::knowledge(Language::English, "Kanchipuram silk weaving on handlooms"),
            RetrievalDocument::knowledge(Language::English, "Madhubani painting from Bihar"),
            RetrievalDocument::knowledge(Language::Hindi, "मिट्टी के बर्तन बनाने की कला"),
        ]
    }

    fn retriever() -> Retriever {
        Retriever::build(Arc::new(HashingEncoder::default()), docs()).unwrap()
    }

    #[test]
    fn test_partitions_by_language() {
        let retriever = retriever();
        assert_eq!(retriever.index().languages(), vec![Language::English, Language::Hindi]);
        assert_eq!(retriever.index().len(), 4);
        assert!(retriever.index().partition(Language::Tamil).is_none());
    }

    #[test]
    fn test_nearest_first() {
        let results = retriever().search("pottery glaze", Language::English, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].document.text.contains("pottery"));
        assert!(results[0].distance <= results[1].distance);
        for r in &results {
            assert!((r.score - 1.0 / (1.0 + r.distance)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_huge_top_k_is_bounded_by_partition() {
        let retriever = retriever();
        let results = retriever.search("pottery", Language::English, usize::MAX).unwrap();
        assert_eq!(results.len(), 3);
        let results = retriever.search("pottery", Language::English, 1usize << 44).unwrap();
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_missing_partition_is_empty() {
        let results = retriever().search("anything", Language::Telugu, 3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_retrieve_adds_english_for_other_languages() {
        let retriever = retriever();
        let results = retriever.retrieve("मिट्टी", Language::Hindi).unwrap();
        assert_eq!(results.len(), 1 + FALLBACK_TOP_K);
        assert_eq!(results[0].document.language(), Language::Hindi);

        let results = retriever.retrieve("pottery", Language::English).unwrap();
        assert_eq!(results.len(), PRIMARY_TOP_K);
    }

    #[test]
    fn test_signature_mismatch() {
        let index = retriever().index().clone();
        let other: Arc<dyn Encoder> = Arc::new(HashingEncoder::new(32).unwrap());
        assert!(Retriever::from_index(other, index.clone()).is_err());
        assert!(Retriever::from_index(Arc::new(HashingEncoder::default()), index).is_ok());
    }

    #[test]
    fn test_context_is_bounded() {
        let long = "x".repeat(400);
        let results: Vec<ScoredDocument> = (0..4)
            .map(|_| ScoredDocument {
                document: RetrievalDocument::knowledge(Language::English, long.clone()),
                score: 1.0,
                distance: 0.0,
            })
            .collect();
        assert_eq!(context_from(&results).chars().count(), 500);
        assert_eq!(context_from(&[]), "");
    }
}
