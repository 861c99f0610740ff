use crate::secrets::{SecretStore, error::SecretError};
use async_trait::async_trait;
use std::collections::HashMap;

/// In-memory secret store for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    entries: HashMap<String, String>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        MemorySecretStore::default()
    }

    pub fn with_secret(mut self, handle: &str, payload: &str) -> Self {
        self.entries.insert(handle.to_string(), payload.to_string());
        self
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn fetch(&self, handle: &str) -> Result<String, SecretError> {
        self.entries
            .get(handle)
            .cloned()
            .ok_or_else(|| SecretError::NotFound(handle.to_string()))
    }
}
