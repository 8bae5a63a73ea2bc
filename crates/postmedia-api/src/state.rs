use crate::services::{IngestionOrchestrator, RetrievalService};
use postmedia_db::MetadataRepository;
use postmedia_storage::{BlobUploader, StagingStore};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn MetadataRepository>,
    pub ingestion: IngestionOrchestrator,
    pub retrieval: RetrievalService,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn MetadataRepository>,
        uploader: Arc<dyn BlobUploader>,
        staging: StagingStore,
    ) -> Self {
        Self {
            ingestion: IngestionOrchestrator::new(repository.clone(), staging, uploader),
            retrieval: RetrievalService::new(repository.clone()),
            repository,
        }
    }
}
