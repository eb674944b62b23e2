//! Error types for the document store

use thiserror::Error;

/// Errors that can occur when working with the document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reading or writing the data file
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error encoding or decoding the document
    #[error("Store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The in-process lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    Poisoned,
}
