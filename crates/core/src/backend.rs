//! Backend capability trait
//!
//! This is the only surface the adapter needs from an object store. Concrete
//! SDK clients implement it in their own crates; `MemoryBackend` implements it
//! for tests.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BackendResult;
use crate::path::ObjectPath;

/// Object-store operations the adapter delegates to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short backend name used in log lines, e.g. "s3"
    fn name(&self) -> &'static str;

    /// Whether an object or a directory prefix exists at `path`
    async fn has(&self, path: &ObjectPath) -> BackendResult<bool>;

    /// Create a directory prefix
    async fn create_dir(&self, path: &ObjectPath) -> BackendResult<()>;

    /// Write an object, replacing any existing content
    async fn write(&self, path: &ObjectPath, data: Bytes) -> BackendResult<()>;

    /// Read the full content of an object
    async fn read(&self, path: &ObjectPath) -> BackendResult<Bytes>;
}
