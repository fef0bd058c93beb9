//! Error types for stash-core
//!
//! Backend implementations report [`BackendError`]; the adapter wraps it into
//! [`Error`] together with the path the operation was working on.

use thiserror::Error;

/// Boxed error used when the cause of a read may come from several layers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for stash-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for backend capabilities
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Failure reported by a storage backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

impl BackendError {
    /// Returns true when the backend reported a missing object
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }
}

/// Errors surfaced by the storage adapter
#[derive(Error, Debug)]
pub enum Error {
    /// `mkdir` target already exists
    #[error("Path already exists: {0}")]
    PathConflict(String),

    /// Local source file or backend object could not be read
    #[error("Cannot read {path}: {source}")]
    SourceRead {
        path: String,
        #[source]
        source: BoxError,
    },

    /// Backend rejected a write
    #[error("Backend write to {path} failed: {source}")]
    BackendWrite {
        path: String,
        #[source]
        source: BackendError,
    },

    /// Backend failed a query that is not a read or a write
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Path is empty after normalization
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::SourceRead`] from any error cause
    pub fn source_read(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::SourceRead {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidPath(_) => 2,
            Error::Backend(e) | Error::BackendWrite { source: e, .. } => match e {
                BackendError::Network(_) => 3,
                BackendError::AccessDenied(_) => 4,
                BackendError::NotFound(_) => 5,
                BackendError::Other(_) => 1,
            },
            Error::SourceRead { .. } => 5,
            Error::PathConflict(_) => 6,
        }
    }
}
