use model::core::data_type::DataType;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
    pub ordinal: usize,
}

/// Shape of the destination table, established once per run before any row
/// is written. All columns are nullable.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn new(table: &str, columns: Vec<ColumnSchema>) -> Self {
        TableSchema {
            table: table.to_string(),
            columns,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

pub fn normalize_col_name(name: &str) -> String {
    name.replace(" ", "_")
        .replace("-", "_")
        .replace(".", "_")
        .replace("(", "_")
        .replace(")", "_")
        .replace(",", "_")
        .to_lowercase()
}
