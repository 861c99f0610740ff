use crate::records::row::RowData;

/// A bounded group of rows written to the destination as one atomic unit.
/// Batches arrive in source order; the final batch of a file may be smaller
/// than the configured chunk size.
#[derive(Debug, Clone)]
pub struct RowBatch {
    /// 0-based position of this batch within the run.
    pub index: usize,
    pub rows: Vec<RowData>,
}

impl RowBatch {
    pub fn new(index: usize, rows: Vec<RowData>) -> Self {
        RowBatch { index, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
