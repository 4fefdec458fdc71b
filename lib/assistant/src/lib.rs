//! # Kala-Kaart Assistant
//!
//! Multilingual chat over the artisan directory. A message goes through
//! language detection, intent classification and entity extraction, and is
//! then answered either by a filter search over the record store or by
//! retrieval over the knowledge corpus.
//!
//! ## Example
//!
//! ```rust
//! use kalakaart_assistant::{Assistant, ChatRequest, Intent, PatternClassifier};
//! use kalakaart_core::RecordStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(RecordStore::from_records(Vec::new()));
//! let assistant = Assistant::new(store, Box::new(PatternClassifier::new().unwrap()));
//!
//! let response = assistant.chat(&ChatRequest::new("hello"));
//! assert_eq!(response.intent, Intent::Greeting);
//! ```

pub mod entities;
pub mod error;
pub mod intent;
pub mod pipeline;
pub mod prototype;
pub mod replies;

pub use entities::{Entities, EntityExtractor};
pub use error::{AssistantError, Result};
pub use intent::{ClassifierKind, Intent, IntentClassifier, PatternClassifier};
pub use pipeline::{refine_intent, Assistant, ChatRequest, ChatResponse, QueryContext};
pub use prototype::PrototypeClassifier;
pub use replies::{fill, replies, Replies};
