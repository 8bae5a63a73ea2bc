//! Test helpers: build AppState and router for integration tests.
//!
//! The app runs against the in-memory repository and a scripted uploader, so
//! these tests need neither Postgres nor object storage.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use postmedia_api::constants;
use postmedia_api::setup::routes;
use postmedia_api::state::AppState;
use postmedia_core::{BlobBackend, Config};
use postmedia_db::InMemoryMediaRepository;
use postmedia_storage::{
    BlobUploader, LocalBlobStore, StagingStore, StorageError, StorageResult,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const TEST_ORIGIN: &str = "http://localhost:4200";

/// API path under the media prefix (e.g. `/api/media/42`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Uploader that keeps every upload in memory and can be told to fail.
#[derive(Default)]
pub struct ScriptedUploader {
    fail: AtomicBool,
    uploads: Mutex<Vec<Vec<u8>>>,
}

impl ScriptedUploader {
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn uploaded(&self) -> Vec<Vec<u8>> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlobUploader for ScriptedUploader {
    async fn upload(&self, local_path: &Path) -> StorageResult<String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("scripted failure".to_string()));
        }
        let data = tokio::fs::read(local_path).await?;
        self.uploads.lock().unwrap().push(data);
        let name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(format!("https://blobs.test/media/{}", name))
    }

    fn backend_type(&self) -> BlobBackend {
        BlobBackend::Local
    }
}

/// Test application: server plus the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub repository: InMemoryMediaRepository,
    pub uploader: Arc<ScriptedUploader>,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently left in the staging directory.
    pub fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

pub fn test_config(staging_dir: &Path, blob_dir: Option<&Path>) -> Config {
    let staging = staging_dir.display().to_string();
    let blobs = blob_dir.map(|dir| dir.display().to_string());
    Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused/postmedia".to_string()),
        "CORS_ORIGIN" => Some(TEST_ORIGIN.to_string()),
        "STAGING_DIR" => Some(staging.clone()),
        "LOCAL_BLOB_PATH" => blobs.clone(),
        "MAX_UPLOAD_SIZE_MB" => Some("1".to_string()),
        _ => None,
    })
    .expect("Failed to build test config")
}

pub async fn setup_test_app() -> TestApp {
    let staging_dir = TempDir::new().expect("Failed to create staging dir");
    let config = test_config(staging_dir.path(), None);

    let repository = InMemoryMediaRepository::new();
    let uploader = Arc::new(ScriptedUploader::default());
    let staging = StagingStore::new(config.staging_dir().clone())
        .await
        .expect("Failed to create staging store");

    let state = Arc::new(AppState::new(
        Arc::new(repository.clone()),
        uploader.clone(),
        staging,
    ));
    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        repository,
        uploader,
        staging_dir,
    }
}

/// Test application backed by the real local blob store.
pub struct LocalBlobApp {
    pub server: TestServer,
    pub repository: InMemoryMediaRepository,
    pub staging_dir: TempDir,
    pub blob_dir: TempDir,
}

/// Setup test app whose uploads land in a temporary local blob directory.
pub async fn setup_local_blob_app() -> LocalBlobApp {
    let staging_dir = TempDir::new().expect("Failed to create staging dir");
    let blob_dir = TempDir::new().expect("Failed to create blob dir");
    let config = test_config(staging_dir.path(), Some(blob_dir.path()));

    let repository = InMemoryMediaRepository::new();
    let uploader = LocalBlobStore::new(
        config.storage.local_blob_path.clone(),
        config.storage.local_blob_base_url.clone(),
    )
    .await
    .expect("Failed to create local blob store");
    let staging = StagingStore::new(config.staging_dir().clone())
        .await
        .expect("Failed to create staging store");

    let state = Arc::new(AppState::new(
        Arc::new(repository.clone()),
        Arc::new(uploader),
        staging,
    ));
    let app = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    LocalBlobApp {
        server,
        repository,
        staging_dir,
        blob_dir,
    }
}
