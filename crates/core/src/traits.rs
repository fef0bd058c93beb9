//! Generic storage interface
//!
//! The contract services program against. It keeps the names of the
//! classic storage interface (`get`, `file_exists`) so callers written for
//! a local-disk store keep working against an object store.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::path::ObjectPath;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Resolve a caller path to the path used by the store
    fn get(&self, path: &str) -> ObjectPath;

    /// Create a directory; fails if something already exists at `dir`
    async fn mkdir(&self, dir: &str, recursive: bool) -> Result<()>;

    /// Whether an object or directory exists at `path`
    async fn file_exists(&self, path: &str) -> Result<bool>;

    /// Upload a local file to `path`, replacing existing content
    async fn put(&self, file: &Path, path: &str) -> Result<()>;

    /// Append a local file to the object at `path`
    async fn append(&self, file: &Path, path: &str) -> Result<()>;
}
