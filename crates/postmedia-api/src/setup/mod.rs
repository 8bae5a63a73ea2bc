//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::Result;
use postmedia_core::Config;
use postmedia_db::PgMediaRepository;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.base.environment,
        blob_backend = %config.blob_backend(),
        "Configuration loaded"
    );

    let pool = database::setup_database(&config).await?;
    let (uploader, staging) = storage::setup_storage(&config).await?;

    let repository = Arc::new(PgMediaRepository::new(pool));
    let state = Arc::new(AppState::new(repository, uploader, staging));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
