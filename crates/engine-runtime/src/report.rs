use crate::driver::JobFailure;
use chrono::{DateTime, Utc};
use engine_core::state::JobState;
use model::execution::report::LoadResult;
use serde::Serialize;
use uuid::Uuid;

/// Serialized outcome of one run, success or failure. A failed run still
/// reports the rows and chunks committed before the failure.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub table: String,
    pub state: JobState,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub rows_processed: usize,
    pub chunks_processed: usize,
    pub table_recreated: bool,
    pub rows_deleted: bool,
    pub table_state_indeterminate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(
        run_id: Uuid,
        table: &str,
        started_at: DateTime<Utc>,
        outcome: &Result<LoadResult, JobFailure>,
    ) -> Self {
        let finished_at = Utc::now();
        match outcome {
            Ok(result) => RunReport {
                run_id,
                table: table.to_string(),
                state: JobState::Completed,
                started_at,
                finished_at,
                rows_processed: result.rows_processed,
                chunks_processed: result.chunks_processed,
                table_recreated: result.table_recreated,
                rows_deleted: result.rows_deleted,
                table_state_indeterminate: false,
                error: None,
            },
            Err(failure) => RunReport {
                run_id,
                table: table.to_string(),
                state: JobState::Failed,
                started_at,
                finished_at,
                rows_processed: failure.rows_processed,
                chunks_processed: failure.chunks_processed,
                table_recreated: false,
                rows_deleted: false,
                table_state_indeterminate: failure.table_state_indeterminate,
                error: Some(failure.to_string()),
            },
        }
    }
}
