use crate::{
    destination::DataDestination,
    metadata::table::TableSchema,
    sql::{
        error::{ConnectorError, DbError},
        postgres::{client::connect_client, params::PgParamStore},
    },
};
use async_trait::async_trait;
use model::{execution::connection::ConnectionProfile, records::row::RowData};
use std::{sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tokio_postgres::Client;
use tracing::debug;

const QUERY_TABLE_EXISTS_SQL: &str = include_str!("sql/table_exists.sql");

/// Postgres caps bind parameters per statement at u16::MAX; batches whose
/// row-width product exceeds this are split across INSERT statements inside
/// the same transaction, so batch atomicity is preserved.
const MAX_PARAMS_PER_STATEMENT: usize = 32_000;

/// SQLSTATEs meaning the statement no longer fits the table shape.
const SCHEMA_MISMATCH_STATES: [&str; 4] = ["42703", "42804", "42P01", "22P02"];

#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<RwLock<Client>>,
}

impl PgAdapter {
    pub async fn connect(
        profile: &ConnectionProfile,
        timeout: Duration,
    ) -> Result<Self, ConnectorError> {
        let client = Arc::new(RwLock::new(connect_client(profile, timeout).await?));
        Ok(PgAdapter { client })
    }

    fn quote_ident(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn create_table_sql(schema: &TableSchema) -> String {
        let columns = schema
            .columns
            .iter()
            .map(|col| {
                format!(
                    "{} {}",
                    Self::quote_ident(&col.name),
                    col.data_type.postgres_name()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "CREATE TABLE {} ({})",
            Self::quote_ident(&schema.table),
            columns
        )
    }

    fn insert_sql(schema: &TableSchema, row_count: usize) -> String {
        let width = schema.width();
        let columns = schema
            .columns
            .iter()
            .map(|col| Self::quote_ident(&col.name))
            .collect::<Vec<_>>()
            .join(", ");

        let mut tuples = Vec::with_capacity(row_count);
        for row in 0..row_count {
            let placeholders = (0..width)
                .map(|col| format!("${}", row * width + col + 1))
                .collect::<Vec<_>>()
                .join(", ");
            tuples.push(format!("({placeholders})"));
        }

        format!(
            "INSERT INTO {} ({}) VALUES {}",
            Self::quote_ident(&schema.table),
            columns,
            tuples.join(", ")
        )
    }

    fn classify(err: tokio_postgres::Error) -> DbError {
        if let Some(db_err) = err.as_db_error() {
            if SCHEMA_MISMATCH_STATES.contains(&db_err.code().code()) {
                return DbError::SchemaMismatch(db_err.message().to_string());
            }
        }
        DbError::Sql(err)
    }
}

#[async_trait]
impl DataDestination for PgAdapter {
    async fn ping(&self) -> Result<(), DbError> {
        let client = self.client.read().await;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        let client = self.client.read().await;
        let row = client.query_one(QUERY_TABLE_EXISTS_SQL, &[&table]).await?;
        Ok(row.get(0))
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<(), DbError> {
        let sql = Self::create_table_sql(schema);
        debug!(table = %schema.table, "Creating destination table");
        let client = self.client.read().await;
        client.batch_execute(&sql).await?;
        Ok(())
    }

    async fn drop_table(&self, table: &str) -> Result<(), DbError> {
        let sql = format!("DROP TABLE IF EXISTS {}", Self::quote_ident(table));
        debug!(table, "Dropping destination table");
        let client = self.client.read().await;
        client.batch_execute(&sql).await?;
        Ok(())
    }

    async fn truncate_table(&self, table: &str) -> Result<(), DbError> {
        let sql = format!("TRUNCATE TABLE {}", Self::quote_ident(table));
        debug!(table, "Truncating destination table");
        let client = self.client.read().await;
        client.batch_execute(&sql).await?;
        Ok(())
    }

    async fn write_batch(&self, schema: &TableSchema, rows: &[RowData]) -> Result<u64, DbError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let width = schema.width();
        for row in rows {
            if row.width() != width {
                return Err(DbError::SchemaMismatch(format!(
                    "row has {} fields, table '{}' has {} columns",
                    row.width(),
                    schema.table,
                    width
                )));
            }
        }

        let rows_per_statement = (MAX_PARAMS_PER_STATEMENT / width.max(1)).max(1);
        let mut client = self.client.write().await;
        let tx = client.transaction().await?;

        let mut written = 0u64;
        for slice in rows.chunks(rows_per_statement) {
            let sql = Self::insert_sql(schema, slice.len());
            let mut params = PgParamStore::with_capacity(slice.len() * width);
            for row in slice {
                for field in &row.field_values {
                    params.push(field);
                }
            }
            written += tx
                .execute(sql.as_str(), &params.as_refs())
                .await
                .map_err(Self::classify)?;
        }

        tx.commit().await?;
        Ok(written)
    }
}
