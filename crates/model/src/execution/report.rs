use serde::{Deserialize, Serialize};

/// Final accounting for a run that reached `Completed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadResult {
    pub rows_processed: usize,
    pub chunks_processed: usize,
    pub table_recreated: bool,
    pub rows_deleted: bool,
}
