use crate::error::LifecycleError;
use connectors::{destination::DataDestination, metadata::table::TableSchema};
use model::execution::job::{DeleteMode, JobConfig};
use std::str::FromStr;
use tracing::info;

/// What the lifecycle pass did to the destination table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleOutcome {
    /// A fresh table was materialized (drop+recreate, or create-on-missing).
    pub table_recreated: bool,
    /// Pre-existing rows were removed.
    pub rows_deleted: bool,
}

/// Puts the destination table into the state implied by the job flags,
/// before any row is written. Policy order: drop+recreate, create when
/// missing, truncate, append. The delete mode is validated only when the
/// delete branch is actually reached.
pub async fn ensure_table(
    destination: &dyn DataDestination,
    schema: &TableSchema,
    config: &JobConfig,
) -> Result<LifecycleOutcome, LifecycleError> {
    let table = &config.table_name;
    let mut outcome = LifecycleOutcome::default();

    if config.drop_table {
        let existed = exists(destination, table).await?;
        if existed {
            destination
                .drop_table(table)
                .await
                .map_err(|source| LifecycleError::DropFailed {
                    table: table.clone(),
                    source,
                })?;
            info!(table, "Dropped existing destination table");
        }
        destination
            .create_table(schema)
            .await
            .map_err(|source| LifecycleError::CreateFailed {
                table: table.clone(),
                dropped_existing: existed,
                source,
            })?;
        info!(table, "Created destination table");
        outcome.table_recreated = true;
        return Ok(outcome);
    }

    if !exists(destination, table).await? {
        destination
            .create_table(schema)
            .await
            .map_err(|source| LifecycleError::CreateFailed {
                table: table.clone(),
                dropped_existing: false,
                source,
            })?;
        info!(table, "Created missing destination table");
        outcome.table_recreated = true;
        return Ok(outcome);
    }

    if config.delete_rows {
        let mode = DeleteMode::from_str(&config.delete_mode)
            .map_err(|_| LifecycleError::UnsupportedDeleteMode(config.delete_mode.clone()))?;
        match mode {
            DeleteMode::Truncate => {
                destination
                    .truncate_table(table)
                    .await
                    .map_err(|source| LifecycleError::TruncateFailed {
                        table: table.clone(),
                        source,
                    })?;
                info!(table, "Truncated destination table");
                outcome.rows_deleted = true;
            }
        }
        return Ok(outcome);
    }

    info!(table, "Destination table exists, appending");
    Ok(outcome)
}

async fn exists(
    destination: &dyn DataDestination,
    table: &str,
) -> Result<bool, LifecycleError> {
    destination
        .table_exists(table)
        .await
        .map_err(|source| LifecycleError::ExistsCheckFailed {
            table: table.to_string(),
            source,
        })
}
