use kalakaart_core::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Conversation,
    Knowledge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub language: Language,
    pub kind: DocumentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

/// A unit of retrievable text, owned by exactly one language partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalDocument {
    pub text: String,
    pub metadata: DocumentMetadata,
}

impl RetrievalDocument {
    pub fn knowledge(language: Language, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: DocumentMetadata {
                language,
                kind: DocumentKind::Knowledge,
                craft: None,
                location: None,
                intent: None,
            },
        }
    }

    pub fn conversation(language: Language, text: impl Into<String>, intent: Option<String>) -> Self {
        Self {
            text: text.into(),
            metadata: DocumentMetadata {
                language,
                kind: DocumentKind::Conversation,
                craft: None,
                location: None,
                intent,
            },
        }
    }

    pub fn with_craft(mut self, craft: impl Into<String>) -> Self {
        self.metadata.craft = Some(craft.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.metadata.location = Some(location.into());
        self
    }

    #[inline]
    pub fn language(&self) -> Language {
        self.metadata.language
    }
}
