use crate::storage::{ObjectReader, SourceUri, StorageClient, error::StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::fs::File;

/// Filesystem-backed storage for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct LocalStorageClient;

impl LocalStorageClient {
    pub fn new() -> Self {
        LocalStorageClient
    }
}

#[async_trait]
impl StorageClient for LocalStorageClient {
    async fn open(&self, uri: &SourceUri) -> Result<ObjectReader, StorageError> {
        let SourceUri::Local(path) = uri else {
            return Err(StorageError::InvalidUri(format!(
                "{uri:?} is not a local path"
            )));
        };

        let file = File::open(path).await.map_err(|err| match err.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            ErrorKind::PermissionDenied => {
                StorageError::AccessDenied(path.display().to_string())
            }
            _ => StorageError::Io(err),
        })?;

        Ok(Box::pin(file))
    }
}
