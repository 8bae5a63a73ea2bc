//! Local staging of inbound uploads.
//!
//! An upload is written to disk in full before it is handed to object storage.
//! Staged files are named `{uuid}-{sanitized name}` so two requests carrying
//! the same client file name never write to the same path.

use crate::keys::sanitize_file_name;
use crate::traits::{StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use uuid::Uuid;

/// A fully written staged file.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Clone, Debug)]
pub struct StagingStore {
    dir: PathBuf,
}

impl StagingStore {
    /// Create the staging directory if needed.
    pub async fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create staging directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(StagingStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a new upload named `file_name` would be staged at.
    fn staging_path(&self, file_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name)))
    }

    /// Write `reader` to a fresh staging path until EOF.
    ///
    /// A partially written file is removed before the error is returned.
    pub async fn write<R>(&self, file_name: &str, mut reader: R) -> StorageResult<StagedFile>
    where
        R: AsyncRead + Unpin + Send,
    {
        let path = self.staging_path(file_name);
        let start = std::time::Instant::now();

        let result = async {
            let mut file = fs::File::create(&path).await?;
            let size_bytes = tokio::io::copy(&mut reader, &mut file).await?;
            file.flush().await?;
            file.sync_all().await?;
            Ok::<u64, std::io::Error>(size_bytes)
        }
        .await;

        match result {
            Ok(size_bytes) => {
                tracing::debug!(
                    path = %path.display(),
                    size_bytes,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Upload staged"
                );
                Ok(StagedFile { path, size_bytes })
            }
            Err(e) => {
                if let Err(cleanup_err) = fs::remove_file(&path).await {
                    if cleanup_err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            error = %cleanup_err,
                            path = %path.display(),
                            "Failed to remove partially staged file"
                        );
                    }
                }
                Err(StorageError::IoError(e))
            }
        }
    }

    /// Delete a staged file. A file that is already gone is not an error.
    pub async fn remove(&self, path: &Path) -> StorageResult<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Staged file removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tempfile::tempdir;
    use tokio::io::ReadBuf;

    #[tokio::test]
    async fn test_write_and_remove() {
        let dir = tempdir().unwrap();
        let staging = StagingStore::new(dir.path().join("staging")).await.unwrap();

        let data: &[u8] = b"png bytes";
        let staged = staging.write("photo.png", data).await.unwrap();

        assert_eq!(staged.size_bytes, data.len() as u64);
        assert!(staged.path.starts_with(staging.dir()));
        assert!(staged
            .path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .ends_with("-photo.png"));
        assert_eq!(tokio::fs::read(&staged.path).await.unwrap(), data);

        staging.remove(&staged.path).await.unwrap();
        assert!(!tokio::fs::try_exists(&staged.path).await.unwrap());
    }

    #[tokio::test]
    async fn test_identical_names_do_not_collide() {
        let dir = tempdir().unwrap();
        let staging = StagingStore::new(dir.path()).await.unwrap();

        let first = staging.write("same.jpg", &b"first"[..]).await.unwrap();
        let second = staging.write("same.jpg", &b"second"[..]).await.unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(tokio::fs::read(&first.path).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(&second.path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_traversal_name_stays_inside_staging_dir() {
        let dir = tempdir().unwrap();
        let staging = StagingStore::new(dir.path()).await.unwrap();

        let staged = staging.write("../../escape.txt", &b"x"[..]).await.unwrap();
        assert_eq!(staged.path.parent().unwrap(), staging.dir());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let dir = tempdir().unwrap();
        let staging = StagingStore::new(dir.path()).await.unwrap();
        staging
            .remove(&dir.path().join("never-written"))
            .await
            .unwrap();
    }

    struct FailingReader;

    impl AsyncRead for FailingReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away")))
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let staging = StagingStore::new(dir.path()).await.unwrap();

        let err = staging.write("broken.png", FailingReader).await.unwrap_err();
        assert!(matches!(err, StorageError::IoError(_)));

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}
