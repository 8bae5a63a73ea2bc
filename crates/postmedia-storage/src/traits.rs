//! Object-storage abstraction trait
//!
//! This module defines the `BlobUploader` trait that all object-storage
//! backends implement.

use crate::BlobBackend;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Hand-off of a staged local file to durable object storage.
///
/// One call, one network round trip: implementations do not retry and apply no
/// timeout beyond what their transport does by default.
#[async_trait]
pub trait BlobUploader: Send + Sync {
    /// Upload the file at `local_path` and return its durable URL.
    async fn upload(&self, local_path: &Path) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> BlobBackend;
}
