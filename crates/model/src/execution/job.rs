use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_DELETE_MODE: &str = "TRUNCATE";
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Inputs supplied once by the orchestrator at job start, read-only
/// thereafter. `delete_mode` is carried as the raw orchestrator string and
/// validated by the lifecycle pass only when the delete branch is actually
/// reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub source_uri: String,
    pub table_name: String,
    pub drop_table: bool,
    pub delete_rows: bool,
    pub delete_mode: String,
    pub chunk_size: usize,
}

impl JobConfig {
    pub fn new(source_uri: &str, table_name: &str) -> Self {
        JobConfig {
            source_uri: source_uri.to_string(),
            table_name: table_name.to_string(),
            drop_table: false,
            delete_rows: false,
            delete_mode: DEFAULT_DELETE_MODE.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Row-deletion strategies the loader understands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeleteMode {
    Truncate,
}

impl FromStr for DeleteMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.eq_ignore_ascii_case("truncate") {
            Ok(DeleteMode::Truncate)
        } else {
            Err(format!("'{raw}' is not a supported delete mode"))
        }
    }
}
