//! Staging directory and blob uploader setup

use anyhow::{Context, Result};
use postmedia_core::Config;
use postmedia_storage::{create_uploader, BlobUploader, StagingStore};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn BlobUploader>, StagingStore)> {
    let uploader = create_uploader(config)
        .await
        .context("Failed to initialize blob uploader")?;

    let staging = StagingStore::new(config.staging_dir().clone())
        .await
        .context("Failed to initialize staging directory")?;

    tracing::info!(
        backend = %uploader.backend_type(),
        staging_dir = %staging.dir().display(),
        "Storage initialized"
    );

    Ok((uploader, staging))
}
