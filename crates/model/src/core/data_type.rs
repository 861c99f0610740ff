use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column types a CSV cell can be loaded as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    Long,
    Double,
    Boolean,
    VarChar,
}

impl DataType {
    pub fn postgres_name(&self) -> &'static str {
        match self {
            DataType::Long => "BIGINT",
            DataType::Double => "DOUBLE PRECISION",
            DataType::Boolean => "BOOLEAN",
            DataType::VarChar => "TEXT",
        }
    }

    /// The narrowest type a single raw cell parses as. Empty cells abstain.
    pub fn infer(raw: &str) -> Option<DataType> {
        if raw.is_empty() {
            return None;
        }
        if raw.parse::<i64>().is_ok() {
            return Some(DataType::Long);
        }
        if raw.parse::<f64>().is_ok() {
            return Some(DataType::Double);
        }
        if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false") {
            return Some(DataType::Boolean);
        }
        Some(DataType::VarChar)
    }

    /// Combines two per-cell votes into the type covering both. Long widens
    /// to Double; any other disagreement falls back to VarChar.
    pub fn widen(self, other: DataType) -> DataType {
        use DataType::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Long, Double) | (Double, Long) => Double,
            _ => VarChar,
        }
    }

    /// Parses a raw cell under this type. Empty cells are NULL; a cell that
    /// does not parse is an error carrying the reason.
    pub fn parse_value(&self, raw: &str) -> Result<Option<Value>, String> {
        if raw.is_empty() {
            return Ok(None);
        }
        match self {
            DataType::Long => raw
                .parse::<i64>()
                .map(|v| Some(Value::Int(v)))
                .map_err(|_| format!("'{raw}' is not a valid BIGINT")),
            DataType::Double => raw
                .parse::<f64>()
                .map(|v| Some(Value::Float(v)))
                .map_err(|_| format!("'{raw}' is not a valid DOUBLE PRECISION")),
            DataType::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Ok(Some(Value::Boolean(true)))
                } else if raw.eq_ignore_ascii_case("false") {
                    Ok(Some(Value::Boolean(false)))
                } else {
                    Err(format!("'{raw}' is not a valid BOOLEAN"))
                }
            }
            DataType::VarChar => Ok(Some(Value::String(raw.to_string()))),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.postgres_name())
    }
}
