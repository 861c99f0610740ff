use clap::Subcommand;
use model::execution::job::{DEFAULT_CHUNK_SIZE, DEFAULT_DELETE_MODE};

#[derive(Subcommand)]
pub enum Commands {
    /// Load a CSV object into the destination table.
    ///
    /// Without --drop-table or --delete-rows the load appends. Re-running an
    /// append job writes the same rows again; a retry after a failure should
    /// also pass one of the cleanup flags if duplicates matter.
    Load {
        #[arg(long, help = "Location of the CSV to load (s3://bucket/key or a local path)")]
        source_uri: String,

        #[arg(long, help = "Secret handle resolving to the database credentials")]
        secret_handle: String,

        #[arg(long, help = "Destination table name")]
        table_name: String,

        #[arg(long, help = "Drop and recreate the table before loading")]
        drop_table: bool,

        #[arg(long, help = "Delete existing rows before loading")]
        delete_rows: bool,

        #[arg(
            long,
            default_value = DEFAULT_DELETE_MODE,
            help = "Row deletion strategy; only TRUNCATE is supported"
        )]
        delete_mode: String,

        #[arg(
            long,
            default_value_t = DEFAULT_CHUNK_SIZE,
            value_parser = parse_chunk_size,
            help = "Rows per batch"
        )]
        chunk_size: usize,

        #[arg(long, help = "If set, prints the run report as JSON instead of a table")]
        json: bool,
    },
    /// Resolve the secret and verify the database connection
    TestConn {
        #[arg(long, help = "Secret handle resolving to the database credentials")]
        secret_handle: String,
    },
}

fn parse_chunk_size(raw: &str) -> Result<usize, String> {
    let size: usize = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a valid chunk size"))?;
    if size == 0 {
        return Err("chunk size must be at least 1".to_string());
    }
    Ok(size)
}
