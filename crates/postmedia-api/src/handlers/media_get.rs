use crate::constants::INDEX_PLACEHOLDER;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use postmedia_core::Media;
use std::sync::Arc;

#[tracing::instrument(skip(state))]
pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Media>, HttpAppError> {
    let media = state.retrieval.get_by_raw_id(&id).await?;
    Ok(Json(media))
}

/// Placeholder index; the collection is not listed.
pub async fn media_index() -> Json<&'static str> {
    Json(INDEX_PLACEHOLDER)
}
