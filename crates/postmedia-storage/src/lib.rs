//! Postmedia Storage Library
//!
//! Two concerns live here: staging inbound uploads on local disk
//! (`StagingStore`) and handing staged files to an object store
//! (`BlobUploader`, with local-directory and S3 implementations).
//!
//! # Object key format
//!
//! Uploaded objects are stored under `media/{staged file name}`. Staged file
//! names are `{uuid}-{sanitized original name}`, so keys never collide across
//! requests. Key generation is centralized in the `keys` module.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod staging;
pub mod traits;

// Re-export commonly used types
pub use factory::create_uploader;
#[cfg(feature = "storage-local")]
pub use local::LocalBlobStore;
pub use postmedia_core::BlobBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3BlobStore;
pub use staging::{StagedFile, StagingStore};
pub use traits::{BlobUploader, StorageError, StorageResult};
