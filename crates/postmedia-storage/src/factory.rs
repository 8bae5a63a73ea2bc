#[cfg(feature = "storage-local")]
use crate::LocalBlobStore;
#[cfg(feature = "storage-s3")]
use crate::S3BlobStore;
use crate::{BlobBackend, BlobUploader, StorageError, StorageResult};
use postmedia_core::Config;
use std::sync::Arc;

/// Create a blob uploader based on configuration
pub async fn create_uploader(config: &Config) -> StorageResult<Arc<dyn BlobUploader>> {
    match config.blob_backend() {
        #[cfg(feature = "storage-s3")]
        BlobBackend::S3 => {
            let bucket = config
                .storage
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.storage.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.storage.s3_endpoint.clone();

            let store = S3BlobStore::new(bucket, region, endpoint).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-s3"))]
        BlobBackend::S3 => Err(StorageError::ConfigError(
            "S3 blob backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        BlobBackend::Local => {
            let store = LocalBlobStore::new(
                config.storage.local_blob_path.clone(),
                config.storage.local_blob_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-local"))]
        BlobBackend::Local => Err(StorageError::ConfigError(
            "Local blob backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
