//! Postmedia Core Library
//!
//! This crate provides the domain model, error taxonomy and configuration
//! shared by the repository, storage and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Media, MediaId};
pub use storage_types::BlobBackend;
