use std::time::Duration;
use thiserror::Error;

/// All errors coming from the database layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any SQL driver error.
    #[error("SQL error: {0}")]
    Sql(#[from] tokio_postgres::Error),

    /// The batch no longer matches the lifecycle-established table shape.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Writing rows failed at the application level.
    #[error("Write error: {0}")]
    Write(String),

    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Invalid connection profile: {0}")]
    InvalidProfile(String),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] native_tls::Error),

    /// Connect failures, including the bounded connect timeout expiring.
    #[error("Connection failed: {0}")]
    Connect(#[from] tokio_postgres::Error),
}
