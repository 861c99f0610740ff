use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("Source file has no header row")]
    MissingHeader,

    /// A data row that cannot be loaded. `row` is the 1-based position of
    /// the row among data rows (the header is not counted).
    #[error("Row {row}: {reason} (raw: {raw:?})")]
    RowParse {
        row: u64,
        reason: String,
        raw: String,
    },

    #[error("Schema must be inferred before reading batches")]
    SchemaNotSet,
}
