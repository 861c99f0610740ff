use crate::{SECRET_HANDLE, SECRET_PAYLOAD};
use async_trait::async_trait;
use connectors::{
    destination::DataDestination,
    metadata::table::{ColumnSchema, TableSchema},
    secrets::memory::MemorySecretStore,
    sql::error::{ConnectorError, DbError},
    storage::local::LocalStorageClient,
};
use engine_core::settings::RuntimeSettings;
use engine_runtime::{driver::JobDriver, factory::DestinationFactory};
use model::{
    core::{data_type::DataType, value::FieldValue},
    execution::{connection::ConnectionProfile, job::JobConfig},
    records::row::RowData,
};
use std::{
    collections::HashMap,
    fs,
    sync::{Arc, Mutex},
};
use tempfile::TempDir;

#[derive(Debug, Clone)]
pub struct MemoryTable {
    pub schema: TableSchema,
    pub rows: Vec<RowData>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<String, MemoryTable>,
    calls: Vec<String>,
    fail_create: bool,
    fail_write_on_chunk: Option<usize>,
    writes_seen: usize,
}

/// In-memory destination capturing DDL and writes, with fault injection for
/// the failure-path tests.
#[derive(Debug, Default)]
pub struct MemoryDestination {
    state: Mutex<MemoryState>,
}

impl MemoryDestination {
    pub fn seed_table(&self, schema: TableSchema, rows: Vec<RowData>) {
        let mut state = self.state.lock().unwrap();
        state
            .tables
            .insert(schema.table.clone(), MemoryTable { schema, rows });
    }

    /// Makes every subsequent `create_table` fail.
    pub fn fail_create(&self) {
        self.state.lock().unwrap().fail_create = true;
    }

    /// Makes the write with the given 0-based ordinal fail.
    pub fn fail_write_on_chunk(&self, ordinal: usize) {
        self.state.lock().unwrap().fail_write_on_chunk = Some(ordinal);
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(table)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    pub fn table(&self, table: &str) -> Option<MemoryTable> {
        self.state.lock().unwrap().tables.get(table).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Row counts of the write calls, in order.
    pub fn write_sizes(&self) -> Vec<usize> {
        self.calls()
            .iter()
            .filter_map(|call| call.strip_prefix("write_batch:")?.parse().ok())
            .collect()
    }
}

#[async_trait]
impl DataDestination for MemoryDestination {
    async fn ping(&self) -> Result<(), DbError> {
        self.state.lock().unwrap().calls.push("ping".to_string());
        Ok(())
    }

    async fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("table_exists".to_string());
        Ok(state.tables.contains_key(table))
    }

    async fn create_table(&self, schema: &TableSchema) -> Result<(), DbError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_table".to_string());
        if state.fail_create {
            return Err(DbError::Write("injected create failure".to_string()));
        }
        state.tables.insert(
            schema.table.clone(),
            MemoryTable {
                schema: schema.clone(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    async fn drop_table(&self, table: &str) -> Result<(), DbError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("drop_table".to_string());
        state.tables.remove(table);
        Ok(())
    }

    async fn truncate_table(&self, table: &str) -> Result<(), DbError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("truncate_table".to_string());
        match state.tables.get_mut(table) {
            Some(existing) => {
                existing.rows.clear();
                Ok(())
            }
            None => Err(DbError::Write(format!("table '{table}' does not exist"))),
        }
    }

    async fn write_batch(&self, schema: &TableSchema, rows: &[RowData]) -> Result<u64, DbError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("write_batch:{}", rows.len()));

        let ordinal = state.writes_seen;
        state.writes_seen += 1;
        if state.fail_write_on_chunk == Some(ordinal) {
            return Err(DbError::Write("injected write failure".to_string()));
        }

        for row in rows {
            if row.width() != schema.width() {
                return Err(DbError::SchemaMismatch(format!(
                    "row has {} fields, table '{}' has {} columns",
                    row.width(),
                    schema.table,
                    schema.width()
                )));
            }
        }

        let table = state
            .tables
            .get_mut(&schema.table)
            .ok_or_else(|| DbError::Write(format!("table '{}' does not exist", schema.table)))?;
        table.rows.extend(rows.iter().cloned());
        Ok(rows.len() as u64)
    }
}

pub struct MemoryDestinationFactory {
    destination: Arc<MemoryDestination>,
}

impl MemoryDestinationFactory {
    pub fn new(destination: Arc<MemoryDestination>) -> Self {
        MemoryDestinationFactory { destination }
    }
}

#[async_trait]
impl DestinationFactory for MemoryDestinationFactory {
    async fn connect(
        &self,
        _profile: &ConnectionProfile,
    ) -> Result<Arc<dyn DataDestination>, ConnectorError> {
        Ok(self.destination.clone())
    }
}

pub struct TestHarness {
    pub destination: Arc<MemoryDestination>,
    pub driver: JobDriver,
    pub dir: TempDir,
}

pub fn harness() -> TestHarness {
    harness_with_secret(SECRET_PAYLOAD)
}

pub fn harness_with_secret(payload: &str) -> TestHarness {
    let destination = Arc::new(MemoryDestination::default());
    let secrets = Arc::new(MemorySecretStore::new().with_secret(SECRET_HANDLE, payload));
    let storage = Arc::new(LocalStorageClient::new());
    let factory = Arc::new(MemoryDestinationFactory::new(destination.clone()));
    let driver = JobDriver::new(secrets, storage, factory, RuntimeSettings::default());

    TestHarness {
        destination,
        driver,
        dir: tempfile::tempdir().expect("tempdir"),
    }
}

/// Writes a CSV fixture into the harness dir, returning its path.
pub fn write_csv(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv fixture");
    path.display().to_string()
}

/// Header plus `rows` generated data rows: an int, a string, and a float
/// column.
pub fn orders_csv(rows: usize) -> String {
    let mut contents = String::from("id,customer,total\n");
    for i in 0..rows {
        contents.push_str(&format!("{},customer_{},{}.50\n", i + 1, i % 100, i % 900));
    }
    contents
}

pub fn table_schema(table: &str, columns: &[(&str, DataType)]) -> TableSchema {
    let columns = columns
        .iter()
        .enumerate()
        .map(|(ordinal, (name, data_type))| ColumnSchema {
            name: name.to_string(),
            data_type: *data_type,
            ordinal,
        })
        .collect();
    TableSchema::new(table, columns)
}

/// Builds a row for a seeded table by parsing each cell under the column's
/// type, the same way loaded rows are built.
pub fn seeded_row(schema: &TableSchema, cells: &[&str]) -> RowData {
    let fields = schema
        .columns
        .iter()
        .map(|column| FieldValue {
            name: column.name.clone(),
            value: column
                .data_type
                .parse_value(cells[column.ordinal])
                .expect("seed cell parses"),
            data_type: column.data_type,
        })
        .collect();
    RowData::new(&schema.table, fields)
}

pub fn load_config(source_uri: &str, table: &str) -> JobConfig {
    JobConfig::new(source_uri, table)
}
