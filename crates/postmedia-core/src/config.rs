//! Configuration module
//!
//! Configuration is read from the process environment (after loading a `.env`
//! file when present). Defaults mirror the settings the service has always run
//! with: port 8000, a ten-connection pool recycled every three minutes and a
//! single allowed browser origin.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage_types::BlobBackend;

// Common constants
const SERVER_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 10;
const MIN_CONNECTIONS: u32 = 10;
const MAX_LIFETIME_SECS: u64 = 180;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_UPLOAD_SIZE_MB: usize = 10;
const CORS_ORIGIN: &str = "http://localhost:4200";
const LOCAL_BLOB_PATH: &str = "./blobs";
const LOCAL_BLOB_BASE_URL: &str = "http://localhost:8000/blobs";

/// Server, database pool and CORS settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origin: String,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Idle connections kept open, never more than `db_max_connections`
    pub db_min_connections: u32,
    pub db_max_lifetime_secs: u64,
    pub db_timeout_seconds: u64,
    pub environment: String,
}

/// Staging and object-storage settings
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub staging_dir: PathBuf,
    pub blob_backend: BlobBackend,
    pub local_blob_path: String,
    pub local_blob_base_url: String,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub max_upload_size_bytes: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load `.env` (if any) and read configuration from the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(MAX_CONNECTIONS);
        let db_min_connections = lookup("DB_MIN_CONNECTIONS")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(MIN_CONNECTIONS)
            .min(db_max_connections);

        let base = BaseConfig {
            server_port: match lookup("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            cors_origin: lookup("CORS_ORIGIN")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| CORS_ORIGIN.to_string()),
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections,
            db_min_connections,
            db_max_lifetime_secs: lookup("DB_MAX_LIFETIME_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_LIFETIME_SECS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
        };

        let blob_backend = match lookup("BLOB_BACKEND") {
            Some(raw) => raw.parse()?,
            None => BlobBackend::Local,
        };

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let storage = StorageConfig {
            staging_dir: lookup("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| env::temp_dir().join("postmedia-staging")),
            blob_backend,
            local_blob_path: lookup("LOCAL_BLOB_PATH")
                .unwrap_or_else(|| LOCAL_BLOB_PATH.to_string()),
            local_blob_base_url: lookup("LOCAL_BLOB_BASE_URL")
                .unwrap_or_else(|| LOCAL_BLOB_BASE_URL.to_string()),
            s3_bucket: lookup("S3_BUCKET"),
            s3_region: lookup("S3_REGION").or_else(|| lookup("AWS_REGION")),
            s3_endpoint: lookup("S3_ENDPOINT"),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
        };

        let config = Config { base, storage };
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations the server cannot run with.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.cors_origin.is_empty() || self.base.cors_origin == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGIN must name a single origin; '*' cannot be combined with credentials"
            ));
        }

        if self.storage.blob_backend == BlobBackend::S3 {
            if self.storage.s3_bucket.is_none() {
                return Err(anyhow::anyhow!("S3_BUCKET must be set when BLOB_BACKEND=s3"));
            }
            if self.storage.s3_region.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_REGION or AWS_REGION must be set when BLOB_BACKEND=s3"
                ));
            }
        }

        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS must be at least 1"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origin(&self) -> &str {
        &self.base.cors_origin
    }

    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.base.db_max_connections
    }

    pub fn db_min_connections(&self) -> u32 {
        self.base.db_min_connections
    }

    pub fn db_max_lifetime(&self) -> Duration {
        Duration::from_secs(self.base.db_max_lifetime_secs)
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.base.db_timeout_seconds)
    }

    pub fn staging_dir(&self) -> &PathBuf {
        &self.storage.staging_dir
    }

    pub fn blob_backend(&self) -> BlobBackend {
        self.storage.blob_backend
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.storage.max_upload_size_bytes
    }
}
