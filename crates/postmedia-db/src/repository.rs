//! Metadata repository trait

use async_trait::async_trait;
use postmedia_core::{AppError, Media, MediaId};

/// Storage of `Media` records.
///
/// Absence is a valid outcome for both lookups and is reported as `Ok(None)`.
/// `insert` must be atomic with respect to the one-media-per-post rule: when a
/// record for the post already exists it fails with `AppError::AlreadyExists`
/// and writes nothing. Any other storage failure is `AppError::PersistenceFailed`.
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// Look up the media record owned by a post.
    async fn find_by_post(&self, post_id: &str) -> Result<Option<Media>, AppError>;

    /// Create a record and return it with its generated id.
    async fn insert(&self, post_id: &str, image_url: &str) -> Result<Media, AppError>;

    /// Look up a media record by id.
    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, AppError>;

    /// Cheap round trip to the backing store.
    async fn health_check(&self) -> Result<(), AppError>;
}
