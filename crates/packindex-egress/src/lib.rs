//! PackIndex Egress
//!
//! This crate talks to the catalog endpoint:
//! - HTTP client configuration
//! - The pack fetcher (one GET, body parsed as JSON)

pub mod client;
pub mod fetcher;

pub use client::{HttpClientConfig, create_client};
pub use fetcher::{DEFAULT_PACKS_URL, PackFetcher, fetch};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EgressError {
    /// Connection failure, timeout, or a failure while reading the body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body is not valid JSON
    #[error("Failed to parse response body: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Catalog endpoint returned status {status_code}: {message}")]
    Status { status_code: u16, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] packindex_core::Error),
}

impl EgressError {
    /// Whether the request failed before any response arrived
    pub fn is_network(&self) -> bool {
        matches!(self, EgressError::Network(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, EgressError::Network(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, EgressError>;
