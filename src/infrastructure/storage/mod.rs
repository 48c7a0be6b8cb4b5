//! Document store clients.
//!
//! The pipeline consumes the store through the [`DocumentStorage`] trait;
//! the HTTP implementation talks to the real object store, and
//! [`MemoryStorage`] stands in for tests and deployments without one.

pub mod http_storage;
pub mod memory_storage;
pub mod service;

pub use http_storage::HttpDocumentStorage;
pub use memory_storage::MemoryStorage;
pub use service::{DocumentStorage, StorageError};
