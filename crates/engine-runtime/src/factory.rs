use async_trait::async_trait;
use connectors::{
    destination::DataDestination,
    sql::{error::ConnectorError, postgres::adapter::PgAdapter},
};
use engine_core::settings::RuntimeSettings;
use model::execution::connection::ConnectionProfile;
use std::sync::Arc;

/// Builds the destination once credentials are resolved. The seam lets
/// tests swap in an in-memory destination.
#[async_trait]
pub trait DestinationFactory: Send + Sync {
    async fn connect(
        &self,
        profile: &ConnectionProfile,
    ) -> Result<Arc<dyn DataDestination>, ConnectorError>;
}

/// Default factory: a TLS-capable Postgres connection.
pub struct PgDestinationFactory {
    settings: RuntimeSettings,
}

impl PgDestinationFactory {
    pub fn new(settings: RuntimeSettings) -> Self {
        PgDestinationFactory { settings }
    }
}

#[async_trait]
impl DestinationFactory for PgDestinationFactory {
    async fn connect(
        &self,
        profile: &ConnectionProfile,
    ) -> Result<Arc<dyn DataDestination>, ConnectorError> {
        let adapter = PgAdapter::connect(profile, self.settings.connect_timeout).await?;
        Ok(Arc::new(adapter))
    }
}
