//! HTTP surface of Kala-Kaart.
//!
//! Every route is served both at the root and under `/api`. Errors are
//! returned as `{"error": "..."}` bodies.

pub mod config;
pub mod error;
pub mod rest;
pub mod state;

pub use config::{EncoderKind, ServerConfig};
pub use error::{ApiError, Result};
pub use rest::{configure, RestApi};
pub use state::AppState;
