use crate::{metadata::table::TableSchema, sql::error::DbError};
use async_trait::async_trait;
use model::records::row::RowData;

/// Write side of a load: lifecycle DDL plus batched row writes.
///
/// Rows handed to `write_batch` carry their fields in the schema's column
/// order; implementations bind values positionally and must reject a batch
/// whose row width no longer matches the schema.
#[async_trait]
pub trait DataDestination: Send + Sync {
    async fn ping(&self) -> Result<(), DbError>;

    async fn table_exists(&self, table: &str) -> Result<bool, DbError>;

    async fn create_table(&self, schema: &TableSchema) -> Result<(), DbError>;

    async fn drop_table(&self, table: &str) -> Result<(), DbError>;

    async fn truncate_table(&self, table: &str) -> Result<(), DbError>;

    /// Writes the batch as a single unit of work and returns the number of
    /// rows written. Either the whole batch commits or none of it does.
    async fn write_batch(&self, schema: &TableSchema, rows: &[RowData]) -> Result<u64, DbError>;
}
