pub mod ingestion;
pub mod retrieval;

pub use ingestion::IngestionOrchestrator;
pub use retrieval::RetrievalService;
