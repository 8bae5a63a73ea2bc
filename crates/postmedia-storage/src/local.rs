use crate::keys::object_key_for;
use crate::traits::{BlobUploader, StorageError, StorageResult};
use crate::BlobBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Local filesystem object store
///
/// Copies staged files into a directory that a static file server (or a CDN
/// origin) exposes under `base_url`.
#[derive(Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for stored objects (e.g., "/var/lib/postmedia/blobs")
    /// * `base_url` - Base URL objects are served from (e.g., "http://localhost:8000/blobs")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create blob directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore {
            base_path,
            base_url,
        })
    }

    /// Generate public URL for an object key
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Filesystem path backing an object key
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl BlobUploader for LocalBlobStore {
    async fn upload(&self, local_path: &Path) -> StorageResult<String> {
        let key = object_key_for(local_path)?;
        let target = self.key_path(&key);
        let start = std::time::Instant::now();

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let size = fs::copy(local_path, &target).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(local_path.display().to_string())
            } else {
                StorageError::UploadFailed(format!(
                    "Failed to copy {} to {}: {}",
                    local_path.display(),
                    target.display(),
                    e
                ))
            }
        })?;

        let url = self.generate_url(&key);

        tracing::info!(
            path = %target.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob upload successful"
        );

        Ok(url)
    }

    fn backend_type(&self) -> BlobBackend {
        BlobBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use crate::StagingStore;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_upload_copies_file() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(
            dir.path().join("blobs"),
            "http://localhost:8000/blobs/".to_string(),
        )
        .await
        .unwrap();

        let staged = dir.path().join("1234-photo.png");
        tokio::fs::write(&staged, b"image").await.unwrap();

        let url = store.upload(&staged).await.unwrap();
        assert_eq!(url, "http://localhost:8000/blobs/media/1234-photo.png");

        let stored = tokio::fs::read(store.key_path("media/1234-photo.png"))
            .await
            .unwrap();
        assert_eq!(stored, b"image");
        // the staged file itself is left for the caller to remove
        assert!(tokio::fs::try_exists(&staged).await.unwrap());
    }

    #[tokio::test]
    async fn test_staged_name_with_inner_dots_uploads() {
        let dir = tempdir().unwrap();
        let staging = StagingStore::new(dir.path().join("staging")).await.unwrap();
        let store = LocalBlobStore::new(
            dir.path().join("blobs"),
            "http://localhost:8000/blobs".to_string(),
        )
        .await
        .unwrap();

        let staged = staging.write("my..cat.png", &b"cat"[..]).await.unwrap();
        let url = store.upload(&staged.path).await.unwrap();

        assert!(url.ends_with("-my..cat.png"), "url {}", url);
        let key = url.trim_start_matches("http://localhost:8000/blobs/");
        assert_eq!(tokio::fs::read(store.key_path(key)).await.unwrap(), b"cat");
    }

    #[tokio::test]
    async fn test_local_upload_missing_source() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost:8000/blobs".to_string())
            .await
            .unwrap();

        let result = store.upload(&dir.path().join("gone.png")).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
        assert_eq!(store.backend_type(), BlobBackend::Local);
    }
}
