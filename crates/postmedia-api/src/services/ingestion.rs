//! Upload ingestion
//!
//! One upload for one post goes through these steps:
//!
//! 1. idempotency check against the metadata repository
//! 2. staging the request body on local disk
//! 3. handing the staged file to the blob uploader
//! 4. best-effort removal of the staged file
//! 5. recording `(post_id, image_url)`
//!
//! The first failing step ends the request. Nothing already done is rolled
//! back: a blob whose metadata could not be recorded stays in object storage
//! and is logged as orphaned.

use postmedia_core::{AppError, Media};
use postmedia_db::MetadataRepository;
use postmedia_storage::{BlobUploader, StagingStore};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncRead;

#[derive(Clone)]
pub struct IngestionOrchestrator {
    repository: Arc<dyn MetadataRepository>,
    staging: StagingStore,
    uploader: Arc<dyn BlobUploader>,
}

impl IngestionOrchestrator {
    pub fn new(
        repository: Arc<dyn MetadataRepository>,
        staging: StagingStore,
        uploader: Arc<dyn BlobUploader>,
    ) -> Self {
        Self {
            repository,
            staging,
            uploader,
        }
    }

    /// Fail with `AlreadyExists` when `post_id` already has media.
    ///
    /// A repository read failure is reported as such, never as "absent".
    pub async fn ensure_no_media(&self, post_id: &str) -> Result<(), AppError> {
        if let Some(existing) = self.repository.find_by_post(post_id).await? {
            tracing::info!(
                post_id = %post_id,
                media_id = %existing.id,
                "Media already exists for post"
            );
            return Err(AppError::AlreadyExists {
                post_id: post_id.to_string(),
            });
        }
        Ok(())
    }

    /// Ingest one upload for `post_id`.
    ///
    /// `reader` is only consumed after the idempotency check passes, so a
    /// duplicate request never touches disk or object storage.
    #[tracing::instrument(skip(self, reader))]
    pub async fn ingest<R>(
        &self,
        post_id: &str,
        file_name: &str,
        reader: R,
    ) -> Result<Media, AppError>
    where
        R: AsyncRead + Unpin + Send,
    {
        tracing::info!("Started upload");

        self.ensure_no_media(post_id).await?;

        let staged = self.staging.write(file_name, reader).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to stage upload");
            AppError::Unrecoverable(format!("Failed to stage upload: {}", e))
        })?;

        let image_url = match self.uploader.upload(&staged.path).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    backend = %self.uploader.backend_type(),
                    "Blob upload failed"
                );
                self.discard_staged(&staged.path).await;
                return Err(AppError::UpstreamUploadFailed(e.to_string()));
            }
        };

        tracing::info!(
            image_url = %image_url,
            size_bytes = staged.size_bytes,
            "Uploaded to object storage"
        );

        self.discard_staged(&staged.path).await;

        let media = self
            .repository
            .insert(post_id, &image_url)
            .await
            .map_err(|e| {
                match &e {
                    AppError::AlreadyExists { .. } => tracing::warn!(
                        orphaned_url = %image_url,
                        "Concurrent upload recorded media first; uploaded blob is orphaned"
                    ),
                    _ => tracing::error!(
                        error = %e,
                        orphaned_url = %image_url,
                        "Failed to record media; uploaded blob is orphaned"
                    ),
                }
                e
            })?;

        tracing::info!(media_id = %media.id, "Media recorded");

        Ok(media)
    }

    /// Remove a staged file, logging instead of failing.
    async fn discard_staged(&self, path: &Path) {
        if let Err(e) = self.staging.remove(path).await {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to remove staged file"
            );
        }
    }
}
