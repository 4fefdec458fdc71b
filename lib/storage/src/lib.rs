//! Persistence for the retrieval index.
//!
//! Encoding the corpus is the slowest part of startup, so the built index can
//! be saved as a snapshot and reloaded on the next start.

pub mod error;
pub mod snapshot;

pub use error::{Result, StorageError};
pub use snapshot::{SnapshotDescription, SnapshotStore};
