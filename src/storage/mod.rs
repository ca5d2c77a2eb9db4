//! Client-side persistence
//!
//! The progress store and the key-value backends it writes through.

pub mod backend;
pub mod progress_store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use progress_store::ProgressStore;

/// Progress store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Stored data is unavailable")]
    Unavailable,

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage backend error: {0}")]
    Backend(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using StoreError
pub type StoreResult<T> = Result<T, StoreError>;
