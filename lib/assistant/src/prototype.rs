use crate::error::Result;
use crate::intent::{Intent, IntentClassifier};
use kalakaart_retrieval::{Encoder, Vector};
use std::sync::Arc;

pub const DEFAULT_MIN_SIMILARITY: f32 = 0.3;

/// Example phrasings that stand in for each intent
const PROTOTYPES: &[(Intent, &[&str])] = &[
    (Intent::Greeting, &["hello", "hi there", "good morning", "namaste", "नमस्ते", "வணக்கம்", "నమస్కారం"]),
    (Intent::FindByCraft, &["find pottery artists", "show me weavers", "madhubani painters", "embroidery artisans"]),
    (Intent::FindByLocation, &["artisans in rajasthan", "artists from kerala", "craftsmen of gujarat"]),
    (Intent::FindByLocationAndCraft, &["pottery artists in gujarat", "weavers from assam", "painters in bihar"]),
    (Intent::GetStatistics, &["how many artists", "database statistics", "total number of artisans"]),
    (Intent::GetContact, &["contact details", "phone number", "how to reach the artist", "email address"]),
    (Intent::Help, &["help", "what can you do", "how do i search", "मदद", "உதவி", "సహాయం"]),
];

/// Nearest-prototype classifier in embedding space.
///
/// Each intent is represented by the embeddings of a few example phrasings;
/// a message takes the intent of its most similar example. Messages below
/// `min_similarity` to every example are `general_query`.
pub struct PrototypeClassifier {
    encoder: Arc<dyn Encoder>,
    prototypes: Vec<(Intent, Vector)>,
    min_similarity: f32,
}

impl PrototypeClassifier {
    pub fn new(encoder: Arc<dyn Encoder>) -> Result<Self> {
        Self::with_threshold(encoder, DEFAULT_MIN_SIMILARITY)
    }

    pub fn with_threshold(encoder: Arc<dyn Encoder>, min_similarity: f32) -> Result<Self> {
        let mut prototypes = Vec::new();
        for (intent, examples) in PROTOTYPES {
            for vector in encoder.encode_batch(examples)? {
                prototypes.push((*intent, vector));
            }
        }
        tracing::debug!("Encoded {} intent prototypes with {}", prototypes.len(), encoder.signature());
        Ok(Self { encoder, prototypes, min_similarity })
    }
}

impl IntentClassifier for PrototypeClassifier {
    fn name(&self) -> &'static str {
        "prototype"
    }

    fn classify(&self, message: &str) -> Result<Intent> {
        if message.trim().is_empty() {
            return Ok(Intent::GeneralQuery);
        }
        let query = self.encoder.encode(message)?;

        let mut best = (Intent::GeneralQuery, self.min_similarity);
        for (intent, prototype) in &self.prototypes {
            let similarity = query.cosine_similarity(prototype);
            if similarity > best.1 {
                best = (*intent, similarity);
            }
        }
        Ok(best.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalakaart_retrieval::HashingEncoder;

    fn classifier() -> PrototypeClassifier {
        PrototypeClassifier::new(Arc::new(HashingEncoder::default())).unwrap()
    }

    #[test]
    fn test_nearest_prototype() {
        let classifier = classifier();
        assert_eq!(classifier.classify("hello").unwrap(), Intent::Greeting);
        assert_eq!(classifier.classify("database statistics please").unwrap(), Intent::GetStatistics);
        assert_eq!(classifier.classify("मदद").unwrap(), Intent::Help);
    }

    #[test]
    fn test_unrelated_text_is_general() {
        let classifier = classifier();
        assert_eq!(classifier.classify("").unwrap(), Intent::GeneralQuery);

        let strict = PrototypeClassifier::with_threshold(Arc::new(HashingEncoder::default()), 1.1).unwrap();
        assert_eq!(strict.classify("hello").unwrap(), Intent::GeneralQuery);
    }
}
