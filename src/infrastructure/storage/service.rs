//! Document storage trait and error types.

use async_trait::async_trait;
use bytes::Bytes;

/// Errors from the external document store.
///
/// Transient failures are distinguished from permanent ones so callers can
/// surface them as retryable; the pipeline itself never retries.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Document not found at '{path}'")]
    NotFound { path: String },

    #[error("Not authorized to read '{path}'")]
    Unauthorized { path: String },

    #[error("Transient storage failure for '{path}': {reason}")]
    Transient { path: String, reason: String },
}

/// Client for the external blob store holding uploaded documents.
///
/// Paths are opaque keys assigned at upload time; this core only ever
/// reads.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::HttpDocumentStorage`] - HTTP object-store client
/// - [`crate::infrastructure::storage::MemoryStorage`] - in-memory store for tests and
///   storage-less deployments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Fetches the raw bytes of a stored document.
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`] - no object at `path`
    /// - [`StorageError::Unauthorized`] - the store rejected the read
    /// - [`StorageError::Transient`] - network or backend failure worth retrying
    async fn fetch(&self, path: &str) -> Result<Bytes, StorageError>;

    /// Checks whether the storage backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
