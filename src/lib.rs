//! # Kala-Kaart
//!
//! A directory and search service for Indian artisans, backed by a CSV
//! dataset.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! kalakaart --dataset data/artisans.csv --port 5000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use kalakaart::prelude::*;
//!
//! let store = RecordStore::load("data/artisans.csv");
//!
//! // Pottery artisans anywhere in Rajasthan, ten per page
//! let filters = SearchFilters {
//!     state: Some("rajasthan".to_string()),
//!     craft_type: Some("pottery".to_string()),
//!     limit: Some(10),
//!     ..Default::default()
//! };
//! let (page, _stats) = search(&store, &filters);
//! println!("{} of {} artisans", page.artists.len(), page.total);
//! ```
//!
//! ## Crate Structure
//!
//! - `kalakaart-core` - records, CSV loading, filtering, similarity and statistics
//! - `kalakaart-retrieval` - text encoders, the knowledge corpus and the per-language index
//! - `kalakaart-assistant` - intent classification, entity extraction and chat replies
//! - `kalakaart-storage` - compressed snapshots of the retrieval index
//! - `kalakaart-api` - the REST API

pub use kalakaart_core::{
    find_similar, search, ArtisanRecord, Catalog, DatasetStats, Error, Language, RecordStore, Result,
    SearchFilters, SearchPage, SimilarArtists,
};

pub use kalakaart_retrieval::{Encoder, HashingEncoder, RetrievalDocument, RetrievalIndex, Retriever};

pub use kalakaart_assistant::{Assistant, ChatRequest, ChatResponse, Intent, PatternClassifier, PrototypeClassifier};

pub use kalakaart_storage::SnapshotStore;

pub use kalakaart_api::{AppState, RestApi, ServerConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        find_similar, search, ArtisanRecord, Assistant, ChatRequest, Error, Language, RecordStore, Result,
        Retriever, SearchFilters, ServerConfig,
    };
}
