pub mod error;
pub mod local;
pub mod router;
pub mod s3;

use crate::storage::error::StorageError;
use async_trait::async_trait;
use std::{path::PathBuf, pin::Pin, str::FromStr};
use tokio::io::AsyncRead;

/// Byte stream over one source object.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

/// Parsed location of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUri {
    S3 { bucket: String, key: String },
    Local(PathBuf),
}

impl FromStr for SourceUri {
    type Err = StorageError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = raw.strip_prefix("s3://") {
            let (bucket, key) = rest
                .split_once('/')
                .ok_or_else(|| StorageError::InvalidUri(raw.to_string()))?;
            if bucket.is_empty() || key.is_empty() {
                return Err(StorageError::InvalidUri(raw.to_string()));
            }
            return Ok(SourceUri::S3 {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        if let Some(rest) = raw.strip_prefix("file://") {
            if rest.is_empty() {
                return Err(StorageError::InvalidUri(raw.to_string()));
            }
            return Ok(SourceUri::Local(PathBuf::from(rest)));
        }
        if raw.contains("://") || raw.is_empty() {
            return Err(StorageError::InvalidUri(raw.to_string()));
        }
        Ok(SourceUri::Local(PathBuf::from(raw)))
    }
}

/// Opens source objects for reading. Implementations stream the object; they
/// never buffer it whole.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn open(&self, uri: &SourceUri) -> Result<ObjectReader, StorageError>;
}
