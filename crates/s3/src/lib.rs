//! stash-s3: S3 SDK backend for stash
//!
//! This crate provides the S3 implementation of the `Backend` trait
//! from stash-core, using the official aws-sdk-s3 crate.

mod client;

use std::sync::Arc;

use stash_core::{Result, StorageAdapter, StorageConfig};

pub use client::S3Backend;

/// Build a storage adapter over S3 from a full configuration
pub async fn connect(config: &StorageConfig) -> Result<StorageAdapter> {
    config.validate()?;
    let backend = S3Backend::new(&config.client, config.bucket.clone()).await?;
    Ok(StorageAdapter::new(Arc::new(backend)))
}
