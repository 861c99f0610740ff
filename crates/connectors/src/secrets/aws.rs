use crate::secrets::{
    SecretStore,
    error::{SecretError, SecretFormatError},
};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::Client;
use tracing::debug;

/// Secret store backed by AWS Secrets Manager.
pub struct AwsSecretStore {
    client: Client,
}

impl AwsSecretStore {
    pub fn new(client: Client) -> Self {
        AwsSecretStore { client }
    }

    /// Builds a client from the ambient AWS environment (region, credentials
    /// chain).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        AwsSecretStore::new(Client::new(&config))
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn fetch(&self, handle: &str) -> Result<String, SecretError> {
        debug!(handle, "Fetching secret payload");
        let output = self
            .client
            .get_secret_value()
            .secret_id(handle)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .map(|service| service.is_resource_not_found_exception())
                    .unwrap_or(false);
                if not_found {
                    SecretError::NotFound(handle.to_string())
                } else {
                    SecretError::AccessDenied(format!("{handle}: {err}"))
                }
            })?;

        output.secret_string().map(str::to_string).ok_or_else(|| {
            SecretError::Format(SecretFormatError::InvalidJson(
                "secret has no string payload".to_string(),
            ))
        })
    }
}
