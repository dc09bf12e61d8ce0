//! Error types for PackIndex Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The document or one of its records does not have the expected shape
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A tag value that cannot be used as a map key (array or object)
    #[error("Unhashable tag value: {0}")]
    UnhashableTag(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
