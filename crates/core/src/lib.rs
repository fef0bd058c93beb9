//! stash-core: Core library for the stash storage adapter
//!
//! This crate provides:
//! - Path normalization
//! - Storage configuration loading and validation
//! - The `Backend` capability trait and an in-memory backend
//! - `StorageAdapter`, which implements the generic `Storage` interface
//!   on top of any backend
//!
//! This crate is designed to be independent of any specific object-store SDK,
//! so the adapter can be tested against a fake or in-memory backend.

pub mod adapter;
pub mod backend;
pub mod config;
pub mod error;
pub mod memory;
pub mod path;
pub mod traits;

pub use adapter::StorageAdapter;
pub use backend::Backend;
pub use config::{ClientConfig, Credentials, StorageConfig};
pub use error::{BackendError, BackendResult, Error, Result};
pub use memory::MemoryBackend;
pub use path::{ObjectPath, normalize};
pub use traits::Storage;
