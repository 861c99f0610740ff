#[cfg(test)]
mod tests {
    use crate::{
        SECRET_HANDLE,
        utils::{harness, harness_with_secret, load_config, orders_csv, seeded_row, table_schema, write_csv},
    };
    use connectors::{file::csv::error::FileError, secrets::error::{SecretError, SecretFormatError}};
    use engine_core::{
        error::{JobError, LifecycleError},
        state::JobState,
    };
    use model::core::data_type::DataType;

    const TABLE: &str = "orders";

    #[tokio::test]
    async fn chunk_count_is_ceiling_of_rows_over_chunk_size() {
        let h = harness();
        let path = write_csv(&h.dir, "orders.csv", &orders_csv(5));
        let mut config = load_config(&path, TABLE);
        config.chunk_size = 2;

        let result = h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        assert_eq!(result.rows_processed, 5);
        assert_eq!(result.chunks_processed, 3);
        assert_eq!(h.destination.write_sizes(), vec![2, 2, 1]);
        assert_eq!(h.destination.row_count(TABLE), 5);
    }

    #[tokio::test]
    async fn twenty_five_thousand_rows_split_into_three_batches() {
        let h = harness();
        let path = write_csv(&h.dir, "orders.csv", &orders_csv(25_000));
        let config = load_config(&path, TABLE);

        let result = h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        assert_eq!(result.rows_processed, 25_000);
        assert_eq!(result.chunks_processed, 3);
        assert_eq!(h.destination.write_sizes(), vec![10_000, 10_000, 5_000]);
    }

    #[tokio::test]
    async fn drop_table_runs_are_idempotent() {
        let h = harness();
        let path = write_csv(&h.dir, "orders.csv", &orders_csv(7));
        let mut config = load_config(&path, TABLE);
        config.drop_table = true;

        let first = h.driver.run(&config, SECRET_HANDLE).await.unwrap();
        let second = h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        assert!(first.table_recreated);
        assert!(second.table_recreated);
        assert_eq!(h.destination.row_count(TABLE), 7);
    }

    #[tokio::test]
    async fn truncate_replaces_preexisting_rows() {
        let h = harness();
        let schema = table_schema(
            TABLE,
            &[
                ("id", DataType::Long),
                ("customer", DataType::VarChar),
                ("total", DataType::Double),
            ],
        );
        let stale = (0..4)
            .map(|i| seeded_row(&schema, &[&i.to_string(), "old", "1.0"]))
            .collect();
        h.destination.seed_table(schema, stale);

        let path = write_csv(&h.dir, "orders.csv", &orders_csv(3));
        let mut config = load_config(&path, TABLE);
        config.delete_rows = true;

        let result = h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        assert!(result.rows_deleted);
        assert!(!result.table_recreated);
        assert_eq!(h.destination.row_count(TABLE), 3);
    }

    #[tokio::test]
    async fn append_keeps_preexisting_rows() {
        let h = harness();
        let schema = table_schema(
            TABLE,
            &[
                ("id", DataType::Long),
                ("customer", DataType::VarChar),
                ("total", DataType::Double),
            ],
        );
        let existing = (0..4)
            .map(|i| seeded_row(&schema, &[&i.to_string(), "kept", "1.0"]))
            .collect();
        h.destination.seed_table(schema, existing);

        let path = write_csv(&h.dir, "orders.csv", &orders_csv(3));
        let config = load_config(&path, TABLE);

        let result = h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        assert_eq!(result.rows_processed, 3);
        assert!(!result.rows_deleted);
        assert_eq!(h.destination.row_count(TABLE), 7);
    }

    #[tokio::test]
    async fn append_rerun_duplicates_rows() {
        // Documented caller responsibility: retrying an append run without
        // drop/delete flags writes the same rows again.
        let h = harness();
        let path = write_csv(&h.dir, "orders.csv", &orders_csv(3));
        let config = load_config(&path, TABLE);

        h.driver.run(&config, SECRET_HANDLE).await.unwrap();
        h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        assert_eq!(h.destination.row_count(TABLE), 6);
    }

    #[tokio::test]
    async fn malformed_row_aborts_its_chunk_and_keeps_prior_chunks() {
        let h = harness();
        let contents = "id,customer,total\n1,a,1.0\n2,b,2.0\n3,c\n4,d,4.0\n";
        let path = write_csv(&h.dir, "orders.csv", contents);
        let mut config = load_config(&path, TABLE);
        config.chunk_size = 2;

        let failure = h.driver.run(&config, SECRET_HANDLE).await.unwrap_err();

        assert_eq!(failure.state, JobState::Loading);
        assert_eq!(failure.chunks_processed, 1);
        assert_eq!(failure.rows_processed, 2);
        assert_eq!(h.destination.row_count(TABLE), 2);
        match failure.error {
            JobError::File(FileError::RowParse { row, ref raw, .. }) => {
                assert_eq!(row, 3);
                assert_eq!(raw, "3,c");
            }
            other => panic!("expected RowParse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn write_failure_keeps_committed_chunks() {
        let h = harness();
        h.destination.fail_write_on_chunk(1);
        let path = write_csv(&h.dir, "orders.csv", &orders_csv(5));
        let mut config = load_config(&path, TABLE);
        config.chunk_size = 2;

        let failure = h.driver.run(&config, SECRET_HANDLE).await.unwrap_err();

        assert_eq!(failure.chunks_processed, 1);
        assert_eq!(failure.rows_processed, 2);
        assert_eq!(h.destination.row_count(TABLE), 2);
        assert!(matches!(failure.error, JobError::Database(_)));
    }

    #[tokio::test]
    async fn missing_password_fails_before_touching_the_table() {
        let payload = r#"{"username":"u","host":"h","port":5432,"dbname":"d"}"#;
        let h = harness_with_secret(payload);
        let path = write_csv(&h.dir, "orders.csv", &orders_csv(2));
        let config = load_config(&path, TABLE);

        let failure = h.driver.run(&config, SECRET_HANDLE).await.unwrap_err();

        assert_eq!(failure.state, JobState::Init);
        assert_eq!(failure.rows_processed, 0);
        assert!(h.destination.calls().is_empty());
        assert!(matches!(
            failure.error,
            JobError::Secret(SecretError::Format(SecretFormatError::MissingKey(
                "password"
            )))
        ));
    }

    #[tokio::test]
    async fn port_as_numeric_string_is_accepted() {
        let payload = r#"{"username":"u","password":"p","host":"h","port":"5432","dbname":"d"}"#;
        let h = harness_with_secret(payload);
        let path = write_csv(&h.dir, "orders.csv", &orders_csv(2));
        let config = load_config(&path, TABLE);

        assert!(h.driver.run(&config, SECRET_HANDLE).await.is_ok());
    }

    #[tokio::test]
    async fn unsupported_delete_mode_fails_without_deleting() {
        let h = harness();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        h.destination
            .seed_table(schema.clone(), vec![seeded_row(&schema, &["1"])]);

        let path = write_csv(&h.dir, "orders.csv", "id\n2\n");
        let mut config = load_config(&path, TABLE);
        config.delete_rows = true;
        config.delete_mode = "DELETE".to_string();

        let failure = h.driver.run(&config, SECRET_HANDLE).await.unwrap_err();

        assert!(matches!(
            failure.error,
            JobError::Lifecycle(LifecycleError::UnsupportedDeleteMode(_))
        ));
        assert!(!h.destination.calls().contains(&"truncate_table".to_string()));
        assert_eq!(h.destination.row_count(TABLE), 1);
    }

    #[tokio::test]
    async fn create_failure_after_drop_reports_indeterminate_table() {
        let h = harness();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        h.destination
            .seed_table(schema.clone(), vec![seeded_row(&schema, &["1"])]);
        h.destination.fail_create();

        let path = write_csv(&h.dir, "orders.csv", "id\n2\n");
        let mut config = load_config(&path, TABLE);
        config.drop_table = true;

        let failure = h.driver.run(&config, SECRET_HANDLE).await.unwrap_err();

        assert_eq!(failure.state, JobState::CredentialsResolved);
        assert!(failure.table_state_indeterminate);
        assert!(matches!(
            failure.error,
            JobError::Lifecycle(LifecycleError::CreateFailed { .. })
        ));
    }

    #[tokio::test]
    async fn inferred_schema_types_reach_the_destination() {
        let h = harness();
        let contents = "id,amount,active,note\n1,2.5,true,first\n2,3,false,second\n";
        let path = write_csv(&h.dir, "orders.csv", contents);
        let config = load_config(&path, TABLE);

        h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        let table = h.destination.table(TABLE).unwrap();
        let types: Vec<DataType> = table.schema.columns.iter().map(|c| c.data_type).collect();
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

    #[tokio::test]
    async fn header_only_file_completes_with_zero_chunks() {
        let h = harness();
        let path = write_csv(&h.dir, "orders.csv", "id,customer,total\n");
        let config = load_config(&path, TABLE);

        let result = h.driver.run(&config, SECRET_HANDLE).await.unwrap();

        assert_eq!(result.rows_processed, 0);
        assert_eq!(result.chunks_processed, 0);
        assert!(result.table_recreated);
        assert_eq!(h.destination.row_count(TABLE), 0);
    }

    #[tokio::test]
    async fn missing_source_object_fails_before_loading() {
        let h = harness();
        let path = h.dir.path().join("absent.csv").display().to_string();
        let config = load_config(&path, TABLE);

        let failure = h.driver.run(&config, SECRET_HANDLE).await.unwrap_err();

        assert!(matches!(failure.error, JobError::Storage(_)));
        assert_eq!(failure.chunks_processed, 0);
    }
}
