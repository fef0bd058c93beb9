//! Storage adapter
//!
//! Binds the [`Storage`] interface to any [`Backend`]. The adapter only
//! normalizes paths, guards `mkdir` against existing paths and implements
//! `append` as read-modify-write; everything else is the backend's job.
//!
//! `append` is not atomic. Two concurrent appends to the same path both read
//! the old content and the last write wins, and a reader may see the object
//! before the write lands.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tracing::Dispatch;
use tracing::instrument::WithSubscriber;

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::path::ObjectPath;
use crate::traits::Storage;

/// Adapter from the generic storage interface to one backend
pub struct StorageAdapter {
    backend: Arc<dyn Backend>,
    dispatch: Dispatch,
}

impl StorageAdapter {
    /// Create an adapter logging to the dispatcher that is current right now
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let dispatch = tracing::dispatcher::get_default(Dispatch::clone);
        Self::with_dispatch(backend, dispatch)
    }

    /// Create an adapter that sends its log events to `dispatch`
    pub fn with_dispatch(backend: Arc<dyn Backend>, dispatch: Dispatch) -> Self {
        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(
                backend = backend.name(),
                "The storage service has started with the {} adapter",
                backend.name()
            );
        });
        Self { backend, dispatch }
    }

    /// Name of the wrapped backend
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Normalize a caller path; see [`crate::path::normalize`]
    pub fn normalize(&self, path: &str) -> ObjectPath {
        ObjectPath::new(path)
    }

    /// Normalize a path that is about to reach the backend.
    ///
    /// The empty path names no object and no prefix, so it is rejected here
    /// for every backend alike.
    fn resolve(&self, path: &str) -> Result<ObjectPath> {
        let path = self.normalize(path);
        if path.as_str().is_empty() {
            return Err(Error::InvalidPath(path.into_string()));
        }
        Ok(path)
    }

    /// Whether an object or directory exists at `path`
    pub async fn exists(&self, path: &str) -> Result<bool> {
        let path = self.resolve(path)?;
        self.exists_at(&path)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    /// Create a directory prefix.
    ///
    /// Fails with [`Error::PathConflict`] when the path already exists.
    /// `recursive` is passed through for interface compatibility; object
    /// stores have no intermediate directories to create.
    pub async fn mkdir(&self, path: &str, recursive: bool) -> Result<()> {
        let path = self.resolve(path)?;
        async {
            if self.exists_at(&path).await? {
                return Err(Error::PathConflict(path.to_string()));
            }
            tracing::debug!(path = %path, recursive, "Creating directory");
            self.backend
                .create_dir(&path)
                .await
                .map_err(|source| Error::BackendWrite {
                    path: path.to_string(),
                    source,
                })
        }
        .with_subscriber(self.dispatch.clone())
        .await
    }

    /// Upload the content of a local file, overwriting the object at `path`
    pub async fn put(&self, source: impl AsRef<Path>, path: &str) -> Result<()> {
        let source = source.as_ref();
        let path = self.resolve(path)?;
        async {
            let data = read_local(source).await?;
            self.write(&path, data).await
        }
        .with_subscriber(self.dispatch.clone())
        .await
    }

    /// Append the content of a local file to the object at `path`.
    ///
    /// The object must exist; a missing object is [`Error::SourceRead`].
    pub async fn append(&self, source: impl AsRef<Path>, path: &str) -> Result<()> {
        let source = source.as_ref();
        let path = self.resolve(path)?;
        async {
            let existing = self.read_at(&path).await?;
            let tail = read_local(source).await?;

            let mut combined = BytesMut::with_capacity(existing.len() + tail.len());
            combined.extend_from_slice(&existing);
            combined.extend_from_slice(&tail);

            tracing::debug!(
                path = %path,
                existing = existing.len(),
                appended = tail.len(),
                "Appending to object"
            );
            self.write(&path, combined.freeze()).await
        }
        .with_subscriber(self.dispatch.clone())
        .await
    }

    /// Write an in-memory buffer to `path`, overwriting existing content
    pub async fn put_bytes(&self, path: &str, data: impl Into<Bytes>) -> Result<()> {
        let path = self.resolve(path)?;
        self.write(&path, data.into())
            .with_subscriber(self.dispatch.clone())
            .await
    }

    /// Read the full content of the object at `path`
    pub async fn read(&self, path: &str) -> Result<Bytes> {
        let path = self.resolve(path)?;
        self.read_at(&path)
            .with_subscriber(self.dispatch.clone())
            .await
    }

    async fn exists_at(&self, path: &ObjectPath) -> Result<bool> {
        let found = self.backend.has(path).await?;
        tracing::trace!(path = %path, found, "Checked existence");
        Ok(found)
    }

    async fn read_at(&self, path: &ObjectPath) -> Result<Bytes> {
        self.backend
            .read(path)
            .await
            .map_err(|e| Error::source_read(path.as_str(), e))
    }

    async fn write(&self, path: &ObjectPath, data: Bytes) -> Result<()> {
        let bytes = data.len();
        self.backend
            .write(path, data)
            .await
            .map_err(|source| Error::BackendWrite {
                path: path.to_string(),
                source,
            })?;
        tracing::debug!(path = %path, bytes, "Wrote object");
        Ok(())
    }
}

async fn read_local(source: &Path) -> Result<Bytes> {
    tokio::fs::read(source)
        .await
        .map(Bytes::from)
        .map_err(|e| Error::source_read(source.display().to_string(), e))
}

#[async_trait]
impl Storage for StorageAdapter {
    fn get(&self, path: &str) -> ObjectPath {
        self.normalize(path)
    }

    async fn mkdir(&self, dir: &str, recursive: bool) -> Result<()> {
        StorageAdapter::mkdir(self, dir, recursive).await
    }

    async fn file_exists(&self, path: &str) -> Result<bool> {
        self.exists(path).await
    }

    async fn put(&self, file: &Path, path: &str) -> Result<()> {
        StorageAdapter::put(self, file, path).await
    }

    async fn append(&self, file: &Path, path: &str) -> Result<()> {
        StorageAdapter::append(self, file, path).await
    }
}
