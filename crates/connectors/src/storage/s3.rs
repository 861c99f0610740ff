use crate::storage::{ObjectReader, SourceUri, StorageClient, error::StorageError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use tracing::debug;

/// Object storage client over S3.
pub struct S3StorageClient {
    client: Client,
}

impl S3StorageClient {
    pub fn new(client: Client) -> Self {
        S3StorageClient { client }
    }

    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        S3StorageClient::new(Client::new(&config))
    }
}

#[async_trait]
impl StorageClient for S3StorageClient {
    async fn open(&self, uri: &SourceUri) -> Result<ObjectReader, StorageError> {
        let SourceUri::S3 { bucket, key } = uri else {
            return Err(StorageError::InvalidUri(format!(
                "{uri:?} is not an S3 location"
            )));
        };

        debug!(bucket, key, "Opening source object");
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let missing = err
                    .as_service_error()
                    .map(|service| service.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    StorageError::NotFound(format!("s3://{bucket}/{key}"))
                } else {
                    StorageError::AccessDenied(format!("s3://{bucket}/{key}: {err}"))
                }
            })?;

        Ok(Box::pin(output.body.into_async_read()))
    }
}
