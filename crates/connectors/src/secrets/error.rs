use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretError {
    /// The store refused to hand out the secret.
    #[error("Access to secret '{0}' was denied")]
    AccessDenied(String),

    /// The handle does not resolve to a secret.
    #[error("Secret '{0}' does not exist")]
    NotFound(String),

    #[error("Timed out fetching secret after {0:?}")]
    Timeout(Duration),

    /// The payload was fetched but is not a usable connection secret.
    #[error("Malformed secret payload: {0}")]
    Format(#[from] SecretFormatError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretFormatError {
    #[error("Payload is not a JSON object: {0}")]
    InvalidJson(String),

    #[error("Missing key '{0}' in secret payload")]
    MissingKey(&'static str),

    #[error("Key '{key}' has the wrong type (expected {expected})")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("Port value '{0}' is not a valid port number")]
    PortOutOfRange(String),
}
