use connectors::{
    file::csv::error::FileError,
    secrets::error::SecretError,
    sql::error::{ConnectorError, DbError},
    storage::error::StorageError,
};
use thiserror::Error;

/// Top-level errors for a loader run. Every variant is terminal: the run
/// moves to `Failed` and nothing is retried.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Secret error: {0}")]
    Secret(#[from] SecretError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Connection error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// A task was cancelled or panicked.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Failures while putting the destination table into its required shape.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Unsupported delete mode: {0}")]
    UnsupportedDeleteMode(String),

    #[error("Failed to check table '{table}': {source}")]
    ExistsCheckFailed {
        table: String,
        #[source]
        source: DbError,
    },

    #[error("Failed to drop table '{table}': {source}")]
    DropFailed {
        table: String,
        #[source]
        source: DbError,
    },

    #[error("Failed to create table '{table}': {source}")]
    CreateFailed {
        table: String,
        /// True when an existing table was dropped before the create ran.
        dropped_existing: bool,
        #[source]
        source: DbError,
    },

    #[error("Failed to truncate table '{table}': {source}")]
    TruncateFailed {
        table: String,
        #[source]
        source: DbError,
    },
}

impl LifecycleError {
    /// True when the failure may have left the table in an unknown shape:
    /// the drop committed but the create did not, or a truncate failed.
    /// Exists-check and drop failures leave the previous state in place.
    pub fn leaves_indeterminate(&self) -> bool {
        match self {
            LifecycleError::CreateFailed {
                dropped_existing, ..
            } => *dropped_existing,
            LifecycleError::TruncateFailed { .. } => true,
            _ => false,
        }
    }
}
