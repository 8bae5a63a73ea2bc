use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Object-storage backend types
///
/// Selects which `BlobUploader` implementation the API wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    S3,
    Local,
}

impl FromStr for BlobBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" => Ok(BlobBackend::S3),
            "local" => Ok(BlobBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid blob backend: {}", s)),
        }
    }
}

impl Display for BlobBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BlobBackend::S3 => write!(f, "s3"),
            BlobBackend::Local => write!(f, "local"),
        }
    }
}
