use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid source URI: {0}")]
    InvalidUri(String),

    #[error("Source object not found: {0}")]
    NotFound(String),

    #[error("Access to source object denied: {0}")]
    AccessDenied(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out opening source object after {0:?}")]
    Timeout(Duration),
}
