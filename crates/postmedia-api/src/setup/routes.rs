//! Route configuration and setup

use crate::constants::{API_PREFIX, LOCAL_BLOB_ROUTE};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use postmedia_core::{BlobBackend, Config};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let media_routes = Router::new()
        .route("/", get(handlers::media_get::media_index))
        .route(
            "/{id}",
            get(handlers::media_get::get_media).post(handlers::media_upload::upload_media),
        );

    let mut app = Router::new()
        .route("/health", get(handlers::health::health))
        .nest(API_PREFIX, media_routes);

    // The local backend hands out URLs under this server's own origin.
    if config.blob_backend() == BlobBackend::Local {
        tracing::info!(
            route = LOCAL_BLOB_ROUTE,
            path = %config.storage.local_blob_path,
            "Serving local blobs"
        );
        app = app.nest_service(LOCAL_BLOB_ROUTE, ServeDir::new(&config.storage.local_blob_path));
    }

    let app = app
        // Multipart otherwise enforces axum's 2MB default before our own limit applies.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS for the single configured origin.
///
/// Credentials are allowed, so methods and headers are listed explicitly.
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origin: HeaderValue = config
        .cors_origin()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid CORS_ORIGIN '{}': {}", config.cors_origin(), e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-requested-with"),
        ]))
}
