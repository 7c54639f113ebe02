//! Object storage access for feed sidecar files.
//!
//! The reconciler only ever *reads* object storage (the dated header
//! sidecars); all writes happen through the catalog service. The trait is
//! therefore read-only by design.
//!
//! Backends address objects by full URI (`s3://bucket/key`) rather than a
//! scoped key, because the feed and lookup bases arrive as caller-supplied
//! URIs in the invocation event.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use url::Url;

use crate::error::{Error, Result};

/// Read-only object storage access.
#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Reads an entire object addressed by full URI.
    ///
    /// Returns `Error::ResourceNotFound` if no object exists at the URI.
    /// Any other storage failure surfaces as `Error::Dependency`.
    async fn get(&self, uri: &str) -> Result<Bytes>;
}

/// In-memory storage backend for testing.
///
/// Thread-safe via `RwLock`; cloning shares the underlying object map so
/// tests can seed objects while a reconciler holds its own handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    objects: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryBackend {
    /// Creates a new empty memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an object at the given URI, replacing any previous content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned. This backend is test-only.
    pub fn insert(&self, uri: impl Into<String>, data: impl Into<Bytes>) {
        self.objects
            .write()
            .expect("memory backend lock poisoned")
            .insert(uri.into(), data.into());
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, uri: &str) -> Result<Bytes> {
        let objects = self.objects.read().map_err(|_| Error::Dependency {
            message: "memory backend lock poisoned".into(),
            source: None,
        })?;

        objects
            .get(uri)
            .cloned()
            .ok_or_else(|| Error::resource_not_found("object", uri))
    }
}

/// Storage backend over the `object_store` crate.
///
/// Resolves the store from the URI scheme on every call (S3 via ambient
/// credentials, plus whatever other schemes `object_store` recognizes).
/// There is deliberately no client or content caching: header sidecars are
/// fetched once per reconciliation cycle and are expected to be stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectStoreBackend;

impl ObjectStoreBackend {
    /// Creates a new object-store backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageBackend for ObjectStoreBackend {
    async fn get(&self, uri: &str) -> Result<Bytes> {
        let url = Url::parse(uri)
            .map_err(|e| Error::InvalidInput(format!("invalid object URI '{uri}': {e}")))?;
        let (store, path) = object_store::parse_url(&url)
            .map_err(|e| Error::dependency_with_source(format!("unsupported store for '{uri}'"), e))?;

        let result = match store.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                return Err(Error::resource_not_found("object", uri));
            }
            Err(e) => {
                return Err(Error::dependency_with_source(
                    format!("storage get failed for '{uri}'"),
                    e,
                ));
            }
        };

        result
            .bytes()
            .await
            .map_err(|e| Error::dependency_with_source(format!("storage read failed for '{uri}'"), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_returns_stored_bytes() {
        let backend = MemoryBackend::new();
        backend.insert("s3://bucket/key", Bytes::from_static(b"payload"));

        let data = backend.get("s3://bucket/key").await.expect("get");
        assert_eq!(data, Bytes::from_static(b"payload"));
    }

    #[tokio::test]
    async fn memory_backend_missing_object_is_not_found() {
        let backend = MemoryBackend::new();

        let err = backend.get("s3://bucket/missing").await.unwrap_err();
        assert!(err.is_not_found(), "expected not-found, got: {err}");
    }

    #[tokio::test]
    async fn memory_backend_clones_share_state() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        handle.insert("s3://bucket/shared", Bytes::from_static(b"x"));

        assert!(backend.get("s3://bucket/shared").await.is_ok());
    }

    #[tokio::test]
    async fn object_store_backend_rejects_malformed_uri() {
        let backend = ObjectStoreBackend::new();

        let err = backend.get("not a uri").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
