/// Prefix every media route is mounted under.
pub const API_PREFIX: &str = "/api/media";

/// Route the local blob directory is served under.
pub const LOCAL_BLOB_ROUTE: &str = "/blobs";

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Body of `GET /api/media`.
pub const INDEX_PLACEHOLDER: &str = "Hello world";

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "postmedia=debug,tower_http=debug";
