use crate::core::value::{FieldValue, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub table: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(table: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            table: table.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    /// Number of cells in the row.
    pub fn width(&self) -> usize {
        self.field_values.len()
    }
}
