//! Database repositories for media metadata
//!
//! `MetadataRepository` is the seam the ingestion and retrieval services depend
//! on. `PgMediaRepository` is the production implementation over a shared
//! `PgPool`; the in-memory implementation backs tests.

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
pub mod postgres;
pub mod repository;

pub use postgres::PgMediaRepository;
pub use repository::MetadataRepository;

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::InMemoryMediaRepository;
