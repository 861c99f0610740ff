use engine_core::error::JobError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to serialize report: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// The run ended in `Failed`; details are in the printed report.
    #[error("Load job failed")]
    JobFailed,

    #[error("Connection test failed: {0}")]
    Preflight(#[source] JobError),
}
