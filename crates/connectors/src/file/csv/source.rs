use crate::{
    file::csv::{error::FileError, schema},
    metadata::table::TableSchema,
    storage::ObjectReader,
};
use csv_async::{AsyncReader, AsyncReaderBuilder, StringRecord};
use futures_util::StreamExt;
use model::{
    core::value::FieldValue,
    records::{batch::RowBatch, row::RowData},
};
use tracing::debug;

/// Streaming CSV source producing bounded row batches in file order.
///
/// Forward-only and finite: a restart means re-opening the object from the
/// start. Resident memory is bounded by the chunk size; the first chunk is
/// read once up front so column types can be inferred before the table is
/// created, then replayed as batch 0.
pub struct CsvChunkSource {
    reader: AsyncReader<ObjectReader>,
    headers: Vec<String>,
    schema: Option<TableSchema>,
    /// First chunk, held back for inference until the first `next_batch`.
    buffered: Vec<StringRecord>,
    chunk_size: usize,
    /// 1-based number of the next data row to convert.
    next_row: u64,
    batches_emitted: usize,
    reached_end: bool,
}

impl std::fmt::Debug for CsvChunkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvChunkSource")
            .field("headers", &self.headers)
            .field("schema", &self.schema)
            .field("chunk_size", &self.chunk_size)
            .field("next_row", &self.next_row)
            .field("batches_emitted", &self.batches_emitted)
            .field("reached_end", &self.reached_end)
            .finish_non_exhaustive()
    }
}

impl CsvChunkSource {
    /// Opens the stream and consumes the header row.
    pub async fn open(reader: ObjectReader, chunk_size: usize) -> Result<Self, FileError> {
        let mut reader = AsyncReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .create_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .await?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(FileError::MissingHeader);
        }

        Ok(CsvChunkSource {
            reader,
            headers,
            schema: None,
            buffered: Vec::new(),
            chunk_size,
            next_row: 1,
            batches_emitted: 0,
            reached_end: false,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Reads and buffers the first chunk, then infers the table schema from
    /// header names and the buffered values.
    pub async fn infer_schema(&mut self, table: &str) -> Result<TableSchema, FileError> {
        let first = self.read_raw_chunk().await?;
        let schema = schema::infer_schema(table, &self.headers, &first);
        debug!(
            table,
            columns = schema.columns.len(),
            sampled_rows = first.len(),
            "Inferred table schema from source sample"
        );
        self.buffered = first;
        self.schema = Some(schema.clone());
        Ok(schema)
    }

    /// Next bounded batch of typed rows, or `None` once the file is
    /// exhausted.
    pub async fn next_batch(&mut self) -> Result<Option<RowBatch>, FileError> {
        let schema = self.schema.clone().ok_or(FileError::SchemaNotSet)?;

        let raw = if self.buffered.is_empty() {
            self.read_raw_chunk().await?
        } else {
            std::mem::take(&mut self.buffered)
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let mut rows = Vec::with_capacity(raw.len());
        for record in &raw {
            let row_number = self.next_row;
            self.next_row += 1;
            rows.push(to_row_data(&schema, record, row_number)?);
        }

        let batch = RowBatch::new(self.batches_emitted, rows);
        self.batches_emitted += 1;
        Ok(Some(batch))
    }

    async fn read_raw_chunk(&mut self) -> Result<Vec<StringRecord>, FileError> {
        let mut chunk = Vec::new();
        if self.reached_end {
            return Ok(chunk);
        }

        let mut records = self.reader.records();
        while chunk.len() < self.chunk_size {
            match records.next().await {
                Some(Ok(record)) => chunk.push(record),
                Some(Err(err)) => return Err(FileError::Csv(err)),
                None => {
                    self.reached_end = true;
                    break;
                }
            }
        }
        Ok(chunk)
    }
}

fn to_row_data(
    schema: &TableSchema,
    record: &StringRecord,
    row: u64,
) -> Result<RowData, FileError> {
    if record.len() != schema.width() {
        return Err(FileError::RowParse {
            row,
            reason: format!(
                "expected {} columns, found {}",
                schema.width(),
                record.len()
            ),
            raw: raw_content(record),
        });
    }

    let mut fields = Vec::with_capacity(schema.width());
    for column in &schema.columns {
        let cell = record.get(column.ordinal).unwrap_or("");
        let value = column
            .data_type
            .parse_value(cell)
            .map_err(|reason| FileError::RowParse {
                row,
                reason,
                raw: raw_content(record),
            })?;
        fields.push(FieldValue {
            name: column.name.clone(),
            value,
            data_type: column.data_type,
        });
    }

    Ok(RowData::new(&schema.table, fields))
}

fn raw_content(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}
