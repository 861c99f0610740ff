pub mod aws;
pub mod error;
pub mod memory;
mod payload;

use crate::secrets::error::SecretError;
use async_trait::async_trait;
use model::execution::connection::ConnectionProfile;

/// Resolver for opaque secret handles. Implementations return the raw
/// payload; parsing into a [`ConnectionProfile`] happens in one place so
/// every store shares the same format contract.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn fetch(&self, handle: &str) -> Result<String, SecretError>;
}

/// Fetches and parses the connection secret for `handle`. The profile lives
/// only in memory; callers must not log or persist it.
pub async fn resolve_profile(
    store: &dyn SecretStore,
    handle: &str,
) -> Result<ConnectionProfile, SecretError> {
    let raw = store.fetch(handle).await?;
    let profile = payload::parse_connection_profile(&raw)?;
    Ok(profile)
}
