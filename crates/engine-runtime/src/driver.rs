use crate::factory::DestinationFactory;
use connectors::{
    file::csv::{error::FileError, source::CsvChunkSource},
    secrets::{self, SecretStore, error::SecretError},
    sql::error::DbError,
    storage::{SourceUri, StorageClient, error::StorageError},
};
use engine_core::{error::JobError, lifecycle, settings::RuntimeSettings, state::JobState};
use model::{
    execution::{connection::ConnectionProfile, job::JobConfig, report::LoadResult},
    records::batch::RowBatch,
};
use std::{str::FromStr, sync::Arc};
use thiserror::Error;
use tokio::{sync::mpsc, time::timeout};
use tracing::{debug, error, info};

/// Report for a run that ended in `Failed`. Chunks committed before the
/// failure are not rolled back; the counts let a caller decide whether a
/// retry should also request `drop_table` or `delete_rows` to avoid
/// duplicating rows.
#[derive(Debug, Error)]
#[error("Job failed in state {state}: {error}")]
pub struct JobFailure {
    pub state: JobState,
    #[source]
    pub error: JobError,
    pub rows_processed: usize,
    pub chunks_processed: usize,
    pub table_state_indeterminate: bool,
}

#[derive(Debug)]
struct Progress {
    state: JobState,
    rows_processed: usize,
    chunks_processed: usize,
    table_indeterminate: bool,
}

impl Progress {
    fn new() -> Self {
        Progress {
            state: JobState::Init,
            rows_processed: 0,
            chunks_processed: 0,
            table_indeterminate: false,
        }
    }
}

/// Sequences one load run: resolve credentials, prepare the table, then
/// stream chunks into it. There is no automatic retry: a failed run must be
/// re-invoked from scratch, and an append-mode retry duplicates rows unless
/// the caller also sets a drop/delete flag.
pub struct JobDriver {
    secrets: Arc<dyn SecretStore>,
    storage: Arc<dyn StorageClient>,
    destinations: Arc<dyn DestinationFactory>,
    settings: RuntimeSettings,
}

impl JobDriver {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        storage: Arc<dyn StorageClient>,
        destinations: Arc<dyn DestinationFactory>,
        settings: RuntimeSettings,
    ) -> Self {
        JobDriver {
            secrets,
            storage,
            destinations,
            settings,
        }
    }

    pub async fn run(
        &self,
        config: &JobConfig,
        secret_handle: &str,
    ) -> Result<LoadResult, JobFailure> {
        info!(
            table = %config.table_name,
            source = %config.source_uri,
            chunk_size = config.chunk_size,
            "Starting load job"
        );

        let mut progress = Progress::new();
        match self.run_inner(config, secret_handle, &mut progress).await {
            Ok(result) => {
                info!(
                    rows = result.rows_processed,
                    chunks = result.chunks_processed,
                    "Load completed"
                );
                Ok(result)
            }
            Err(err) => {
                error!(state = %progress.state, error = %err, "Load failed");
                Err(JobFailure {
                    state: progress.state,
                    error: err,
                    rows_processed: progress.rows_processed,
                    chunks_processed: progress.chunks_processed,
                    table_state_indeterminate: progress.table_indeterminate,
                })
            }
        }
    }

    /// Resolves the secret and pings the destination without touching any
    /// table. Used for pre-flight validation.
    pub async fn test_connection(&self, secret_handle: &str) -> Result<(), JobError> {
        let profile = self.resolve_profile(secret_handle).await?;
        let destination = self.destinations.connect(&profile).await?;
        destination.ping().await?;
        Ok(())
    }

    async fn resolve_profile(&self, secret_handle: &str) -> Result<ConnectionProfile, JobError> {
        let profile = timeout(
            self.settings.secret_timeout,
            secrets::resolve_profile(self.secrets.as_ref(), secret_handle),
        )
        .await
        .map_err(|_| SecretError::Timeout(self.settings.secret_timeout))??;
        Ok(profile)
    }

    async fn run_inner(
        &self,
        config: &JobConfig,
        secret_handle: &str,
        progress: &mut Progress,
    ) -> Result<LoadResult, JobError> {
        // Init -> CredentialsResolved
        let profile = self.resolve_profile(secret_handle).await?;
        progress.state = JobState::CredentialsResolved;
        debug!("Credentials resolved");

        let destination = self.destinations.connect(&profile).await?;

        // The schema comes from the source header (plus a first-chunk type
        // sample), so the source is opened before any DDL runs.
        let uri = SourceUri::from_str(&config.source_uri)?;
        let reader = timeout(self.settings.storage_timeout, self.storage.open(&uri))
            .await
            .map_err(|_| StorageError::Timeout(self.settings.storage_timeout))??;
        let mut source = CsvChunkSource::open(reader, config.chunk_size).await?;
        let schema = source.infer_schema(&config.table_name).await?;

        // CredentialsResolved -> TableReady
        let outcome = lifecycle::ensure_table(destination.as_ref(), &schema, config)
            .await
            .map_err(|err| {
                progress.table_indeterminate = err.leaves_indeterminate();
                JobError::from(err)
            })?;
        progress.state = JobState::TableReady;

        // TableReady -> Loading. Batch N+1 is read while batch N is written;
        // the channel capacity bounds resident batches, and dropping the
        // receiver on a write failure halts the reader.
        progress.state = JobState::Loading;
        let (batch_tx, mut batch_rx) = mpsc::channel::<Result<RowBatch, FileError>>(1);
        let reader_task = tokio::spawn(async move {
            loop {
                match source.next_batch().await {
                    Ok(Some(batch)) => {
                        if batch_tx.send(Ok(batch)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        let _ = batch_tx.send(Err(err)).await;
                        break;
                    }
                }
            }
        });

        let write_outcome: Result<(), JobError> = async {
            while let Some(next) = batch_rx.recv().await {
                let batch = next?;
                debug!(chunk = batch.index, rows = batch.len(), "Writing batch");
                let written = timeout(
                    self.settings.write_timeout,
                    destination.write_batch(&schema, &batch.rows),
                )
                .await
                .map_err(|_| DbError::Timeout(self.settings.write_timeout))??;
                progress.rows_processed += written as usize;
                progress.chunks_processed += 1;
            }
            Ok(())
        }
        .await;

        if let Err(err) = write_outcome {
            drop(batch_rx);
            let _ = reader_task.await;
            return Err(err);
        }
        reader_task.await?;

        // Loading -> Completed
        progress.state = JobState::Completed;
        Ok(LoadResult {
            rows_processed: progress.rows_processed,
            chunks_processed: progress.chunks_processed,
            table_recreated: outcome.table_recreated,
            rows_deleted: outcome.rows_deleted,
        })
    }
}
