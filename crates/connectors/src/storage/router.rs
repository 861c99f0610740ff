use crate::storage::{
    ObjectReader, SourceUri, StorageClient, error::StorageError, local::LocalStorageClient,
    s3::S3StorageClient,
};
use async_trait::async_trait;

/// Dispatches opens to the backend named by the URI scheme.
pub struct StorageRouter {
    s3: S3StorageClient,
    local: LocalStorageClient,
}

impl StorageRouter {
    pub fn new(s3: S3StorageClient, local: LocalStorageClient) -> Self {
        StorageRouter { s3, local }
    }

    pub async fn from_env() -> Self {
        StorageRouter::new(S3StorageClient::from_env().await, LocalStorageClient::new())
    }
}

#[async_trait]
impl StorageClient for StorageRouter {
    async fn open(&self, uri: &SourceUri) -> Result<ObjectReader, StorageError> {
        match uri {
            SourceUri::S3 { .. } => self.s3.open(uri).await,
            SourceUri::Local(_) => self.local.open(uri).await,
        }
    }
}
