use crate::metadata::table::{ColumnSchema, TableSchema, normalize_col_name};
use csv_async::StringRecord;
use model::core::data_type::DataType;

/// Builds the table schema from the header row plus a sample of data rows.
///
/// Each non-empty cell votes for the narrowest type it parses as; votes
/// widen across the sample (Long + Double combine to Double, any other
/// conflict falls back to VarChar). A column with no non-empty sample cells
/// is VarChar. All columns are nullable.
pub fn infer_schema(table: &str, headers: &[String], sample: &[StringRecord]) -> TableSchema {
    let mut votes: Vec<Option<DataType>> = vec![None; headers.len()];
    for record in sample {
        for (ordinal, vote) in votes.iter_mut().enumerate() {
            let cell = record.get(ordinal).unwrap_or("");
            let Some(cell_type) = DataType::infer(cell) else {
                continue;
            };
            *vote = Some(vote.map_or(cell_type, |current| current.widen(cell_type)));
        }
    }

    let columns = headers
        .iter()
        .enumerate()
        .map(|(ordinal, name)| ColumnSchema {
            name: normalize_col_name(name),
            data_type: votes[ordinal].unwrap_or(DataType::VarChar),
            ordinal,
        })
        .collect();

    TableSchema::new(table, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cells: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for cell in cells {
            record.push_field(cell);
        }
        record
    }

    #[test]
    fn infers_column_types_from_sample() {
        let headers = vec![
            "id".to_string(),
            "amount".to_string(),
            "active".to_string(),
            "name".to_string(),
        ];
        let sample = vec![
            record(&["1", "9.5", "true", "alice"]),
            record(&["2", "4", "FALSE", "bob"]),
        ];
        let schema = infer_schema("orders", &headers, &sample);
        let types: Vec<DataType> = schema.columns.iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![
                DataType::Long,
                DataType::Double,
                DataType::Boolean,
                DataType::VarChar
            ]
        );
    }

    #[test]
    fn empty_sample_defaults_to_varchar() {
        let headers = vec!["a".to_string(), "b".to_string()];
        let schema = infer_schema("t", &headers, &[]);
        assert!(
            schema
                .columns
                .iter()
                .all(|c| c.data_type == DataType::VarChar)
        );
    }

    #[test]
    fn header_names_are_normalized() {
        let headers = vec!["Customer Id".to_string(), "Phone-1".to_string()];
        let schema = infer_schema("t", &headers, &[]);
        assert_eq!(schema.columns[0].name, "customer_id");
        assert_eq!(schema.columns[1].name, "phone_1");
    }
}
