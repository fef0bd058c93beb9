//! In-memory backend
//!
//! Keeps objects in a map behind a lock. Directories are empty marker
//! objects whose key ends with `/`, the same convention object stores use.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use crate::backend::Backend;
use crate::error::{BackendError, BackendResult};
use crate::path::ObjectPath;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: RwLock<BTreeMap<String, Bytes>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, directory markers included
    pub fn len(&self) -> usize {
        self.objects.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored keys in lexical order
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .read()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn poisoned() -> BackendError {
        BackendError::Other("memory backend lock poisoned".to_string())
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn has(&self, path: &ObjectPath) -> BackendResult<bool> {
        let objects = self.objects.read().map_err(|_| Self::poisoned())?;
        if objects.contains_key(path.as_str()) {
            return Ok(true);
        }
        let prefix = path.dir_marker();
        Ok(objects
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(key, _)| key.starts_with(&prefix)))
    }

    async fn create_dir(&self, path: &ObjectPath) -> BackendResult<()> {
        let mut objects = self.objects.write().map_err(|_| Self::poisoned())?;
        objects.insert(path.dir_marker(), Bytes::new());
        Ok(())
    }

    async fn write(&self, path: &ObjectPath, data: Bytes) -> BackendResult<()> {
        let mut objects = self.objects.write().map_err(|_| Self::poisoned())?;
        objects.insert(path.as_str().to_string(), data);
        Ok(())
    }

    async fn read(&self, path: &ObjectPath) -> BackendResult<Bytes> {
        let objects = self.objects.read().map_err(|_| Self::poisoned())?;
        objects
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| BackendError::NotFound(path.to_string()))
    }
}
