//! # Kala-Kaart Core
//!
//! Core library for the Kala-Kaart artisan directory.
//!
//! This crate provides the record model and the deterministic query services:
//!
//! - [`ArtisanRecord`] - One artisan row with location and contact details
//! - [`RecordStore`] - Read-only collection loaded once from the CSV dataset
//! - [`SearchFilters`] - Conjunctive filters with sorting and pagination
//! - [`find_similar`] - Attribute similarity (craft, then state, then cluster)
//! - [`detect_language`] - Script-based language detection
//!
//! ## Example
//!
//! ```rust
//! use kalakaart_core::{RecordStore, SearchFilters, search};
//! use serde_json::json;
//!
//! let csv = "id,name,gender,age,craft_type,state,district,village,languages,email,phone,phone_available,government_id,cluster_code\n\
//!            1,Meera,Female,34,Pottery,Rajasthan,Jaipur,Sanganer,Hindi,,,Yes,G1,C1";
//! let store = RecordStore::parse(csv).unwrap();
//!
//! let filters = SearchFilters::from_json(&json!({"state": "rj"}));
//! let (page, _stats) = search(&store, &filters);
//! assert_eq!(page.total, 1);
//! ```

pub mod csv;
pub mod error;
pub mod filter;
pub mod language;
pub mod record;
pub mod similar;
pub mod states;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
pub use filter::{search, ArtisanFilter, Filter, FilterCondition, SearchFilters, SearchPage, SortKey};
pub use language::{detect_language, Language};
pub use record::{format_phone_number, ArtisanRecord, Contact, Location};
pub use similar::{find_similar, SimilarArtists, DEFAULT_SIMILAR_LIMIT};
pub use states::match_state;
pub use stats::{available_states, suggest_states, Catalog, DatasetStats, SearchStatistics};
pub use store::RecordStore;
