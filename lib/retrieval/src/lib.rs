//! # Kala-Kaart Retrieval
//!
//! Semantic retrieval over craft knowledge and recorded conversations.
//!
//! - [`Encoder`] - Text to dense vector, with [`HashingEncoder`] as the
//!   dependency-free default and `FastEmbedEncoder` behind the `fastembed` feature
//! - [`LanguageIndex`] - Exact L2 index over one language partition
//! - [`Retriever`] - Encoder plus index; language-aware multi-partition queries
//! - [`corpus`] - Built-in knowledge, dataset summaries and training files

pub mod corpus;
pub mod document;
pub mod encoder;
pub mod error;
#[cfg(feature = "fastembed")]
pub mod fastembed_encoder;
pub mod index;
pub mod vector;

pub use document::{DocumentKind, DocumentMetadata, RetrievalDocument};
pub use encoder::{Encoder, HashingEncoder, DEFAULT_HASHING_DIM, MAX_HASHING_DIM, MIN_HASHING_DIM};
pub use error::{Error, Result};
#[cfg(feature = "fastembed")]
pub use fastembed_encoder::FastEmbedEncoder;
pub use index::{context_from, LanguageIndex, RetrievalIndex, Retriever, ScoredDocument};
pub use vector::Vector;
