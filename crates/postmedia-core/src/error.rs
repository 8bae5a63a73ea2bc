//! Error types module
//!
//! Every failure the ingestion and retrieval paths can produce is a variant of
//! `AppError`. The HTTP layer never inspects messages: it asks the error for its
//! status code and literal tag through `ErrorMetadata`.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected outcomes like a missing record
    Debug,
    /// Warning level - for caller mistakes worth noticing
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Literal error tag sent as the response body (e.g. "media-exists")
    fn error_code(&self) -> &'static str;

    /// Whether the same request may succeed if retried later
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Media already exists for post {post_id}")]
    AlreadyExists { post_id: String },

    #[error("Upload to object storage failed: {0}")]
    UpstreamUploadFailed(String),

    #[error("Failed to persist media: {0}")]
    PersistenceFailed(String),

    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("Staging failed: {0}")]
    Unrecoverable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Unrecoverable(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::AlreadyExists { .. } => (400, "media-exists", false, LogLevel::Debug),
        AppError::UpstreamUploadFailed(_) => (
            500,
            "image-cloudinary-upload-error",
            true,
            LogLevel::Error,
        ),
        AppError::PersistenceFailed(_) => (500, "image-db-save-error", true, LogLevel::Error),
        AppError::NotFound(_) => (404, "media-not-found", false, LogLevel::Debug),
        AppError::Unrecoverable(_) => (500, "image-staging-error", false, LogLevel::Error),
        AppError::InvalidInput(_) => (400, "invalid-upload-request", false, LogLevel::Warn),
        AppError::Database(_) => (500, "media-db-read-error", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &str {
        match self {
            AppError::AlreadyExists { .. } => "AlreadyExists",
            AppError::UpstreamUploadFailed(_) => "UpstreamUploadFailed",
            AppError::PersistenceFailed(_) => "PersistenceFailed",
            AppError::NotFound(_) => "NotFound",
            AppError::Unrecoverable(_) => "Unrecoverable",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Database(_) => "Database",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_already_exists() {
        let err = AppError::AlreadyExists {
            post_id: "42".to_string(),
        };
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "media-exists");
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("42"));
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_upload_and_persistence() {
        let upload = AppError::UpstreamUploadFailed("timeout".to_string());
        assert_eq!(upload.http_status_code(), 500);
        assert_eq!(upload.error_code(), "image-cloudinary-upload-error");

        let persist = AppError::PersistenceFailed("pool closed".to_string());
        assert_eq!(persist.http_status_code(), 500);
        assert_eq!(persist.error_code(), "image-db-save-error");
        assert!(persist.is_recoverable());
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("7".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "media-not-found");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_io_error_is_unrecoverable() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only fs");
        let err = AppError::from(io_err);
        assert_eq!(err.error_type(), "Unrecoverable");
        assert_eq!(err.error_code(), "image-staging-error");
        assert!(err.to_string().contains("read-only fs"));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_database_error_metadata() {
        let err = AppError::from(sqlx::Error::PoolClosed);
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "media-db-read-error");
        assert!(err.detailed_message().contains("Caused by"));
    }
}
