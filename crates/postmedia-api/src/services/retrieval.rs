use postmedia_core::{AppError, Media, MediaId};
use postmedia_db::MetadataRepository;
use std::sync::Arc;

/// Read access to recorded media.
#[derive(Clone)]
pub struct RetrievalService {
    repository: Arc<dyn MetadataRepository>,
}

impl RetrievalService {
    pub fn new(repository: Arc<dyn MetadataRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: MediaId) -> Result<Media, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media {} not found", id)))
    }

    /// Look up media by the raw id taken from a request path.
    ///
    /// An id that is not a number cannot name any row and is reported as
    /// `NotFound` without querying the repository.
    pub async fn get_by_raw_id(&self, raw_id: &str) -> Result<Media, AppError> {
        let id: MediaId = raw_id
            .parse()
            .map_err(|_| AppError::NotFound(format!("Media {} not found", raw_id)))?;
        self.get_by_id(id).await
    }
}
