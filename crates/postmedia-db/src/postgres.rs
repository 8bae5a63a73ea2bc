//! Media repository: queries against the `media` table.

use async_trait::async_trait;
use postmedia_core::{AppError, Media, MediaId};
use sqlx::{PgPool, Postgres};

use crate::repository::MetadataRepository;

/// Row type for the media table (for FromRow).
#[derive(Debug, sqlx::FromRow)]
pub struct MediaRow {
    pub media_id: i64,
    pub post_id: String,
    pub image_url: String,
}

impl MediaRow {
    pub fn into_media(self) -> Media {
        Media {
            id: MediaId(self.media_id),
            post_id: self.post_id,
            image_url: self.image_url,
        }
    }
}

/// Repository for the media table.
#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[async_trait]
impl MetadataRepository for PgMediaRepository {
    #[tracing::instrument(skip(self), fields(db.table = "media", db.operation = "select"))]
    async fn find_by_post(&self, post_id: &str) -> Result<Option<Media>, AppError> {
        let row: Option<MediaRow> = sqlx::query_as::<Postgres, MediaRow>(
            "SELECT media_id, post_id, image_url FROM media WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            tracing::debug!(post_id = %post_id, "Media for post already exists");
        }

        Ok(row.map(MediaRow::into_media))
    }

    #[tracing::instrument(
        skip(self, image_url),
        fields(db.table = "media", db.operation = "insert")
    )]
    async fn insert(&self, post_id: &str, image_url: &str) -> Result<Media, AppError> {
        let row = sqlx::query_as::<Postgres, MediaRow>(
            r#"
            INSERT INTO media (post_id, image_url)
            VALUES ($1, $2)
            RETURNING media_id, post_id, image_url
            "#,
        )
        .bind(post_id)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                tracing::warn!(post_id = %post_id, "Concurrent insert lost the race for post");
                AppError::AlreadyExists {
                    post_id: post_id.to_string(),
                }
            } else {
                tracing::error!(error = %e, post_id = %post_id, "Error inserting media");
                AppError::PersistenceFailed(e.to_string())
            }
        })?;

        Ok(row.into_media())
    }

    #[tracing::instrument(skip(self), fields(db.table = "media", db.record_id = %id))]
    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, AppError> {
        let row: Option<MediaRow> = sqlx::query_as::<Postgres, MediaRow>(
            "SELECT media_id, post_id, image_url FROM media WHERE media_id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MediaRow::into_media))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
