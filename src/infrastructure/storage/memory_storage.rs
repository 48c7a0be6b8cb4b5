//! In-memory document store for tests and storage-less deployments.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use super::service::{DocumentStorage, StorageError};

/// A document store backed by a process-local map.
///
/// Serves as the fallback when no storage endpoint is configured (every
/// fetch fails with `NotFound`) and as the test double for pipeline tests,
/// where targeted failures can be injected per path.
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Bytes>>,
    fail_paths: Mutex<HashSet<String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStorage (no storage endpoint configured)");
        Self::default()
    }

    /// Stores an object under the given path.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Bytes>) {
        self.objects
            .lock()
            .expect("storage lock")
            .insert(path.into(), bytes.into());
    }

    /// Makes subsequent fetches of `path` fail with a transient error.
    pub fn inject_failure(&self, path: impl Into<String>) {
        self.fail_paths
            .lock()
            .expect("storage lock")
            .insert(path.into());
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn fetch(&self, path: &str) -> Result<Bytes, StorageError> {
        if self.fail_paths.lock().expect("storage lock").contains(path) {
            return Err(StorageError::Transient {
                path: path.to_string(),
                reason: "injected failure".to_string(),
            });
        }

        self.objects
            .lock()
            .expect("storage lock")
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                path: path.to_string(),
            })
    }

    async fn health_check(&self) -> bool {
        true
    }
}
