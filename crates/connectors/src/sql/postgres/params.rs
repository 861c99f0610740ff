use model::core::{
    data_type::DataType,
    value::{FieldValue, Value},
};
use tokio_postgres::types::ToSql;

/// Owned parameter bindings for one statement. NULLs are encoded with the
/// column's type so the server-side parameter types stay consistent across
/// rows.
pub struct PgParamStore {
    params: Vec<Box<dyn ToSql + Send + Sync>>,
}

impl PgParamStore {
    pub fn with_capacity(capacity: usize) -> Self {
        PgParamStore {
            params: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, field: &FieldValue) {
        self.params.push(encode(field));
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

fn encode(field: &FieldValue) -> Box<dyn ToSql + Send + Sync> {
    match &field.value {
        Some(Value::Int(v)) => Box::new(*v),
        Some(Value::Float(v)) => Box::new(*v),
        Some(Value::Boolean(v)) => Box::new(*v),
        Some(Value::String(v)) => Box::new(v.clone()),
        Some(Value::Null) | None => match field.data_type {
            DataType::Long => Box::new(None::<i64>),
            DataType::Double => Box::new(None::<f64>),
            DataType::Boolean => Box::new(None::<bool>),
            DataType::VarChar => Box::new(None::<String>),
        },
    }
}
