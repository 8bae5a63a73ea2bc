use crate::constants::FILE_FIELD;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use futures::TryStreamExt;
use postmedia_core::{AppError, Media};
use std::io;
use std::sync::Arc;
use tokio_util::io::StreamReader;

/// Accept one multipart upload for a post.
///
/// The `file` part is streamed straight into staging; other parts are skipped.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Media>, HttpAppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or("upload")
            .to_string();

        let reader = Box::pin(StreamReader::new(
            field.map_err(|e| io::Error::other(e.to_string())),
        ));

        let media = state.ingestion.ingest(&post_id, &file_name, reader).await?;
        return Ok(Json(media));
    }

    // An existing post still answers `media-exists`, as it would with a file.
    state.ingestion.ensure_no_media(&post_id).await?;

    Err(AppError::InvalidInput(format!("Missing multipart field '{}'", FILE_FIELD)).into())
}
