#[cfg(test)]
mod tests {
    use crate::utils::{MemoryDestination, load_config, seeded_row, table_schema};
    use engine_core::{error::LifecycleError, lifecycle};
    use model::core::data_type::DataType;

    const TABLE: &str = "customers";

    fn destination() -> MemoryDestination {
        MemoryDestination::default()
    }

    #[tokio::test]
    async fn creates_missing_table() {
        let dest = destination();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        let config = load_config("ignored.csv", TABLE);

        let outcome = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap();

        assert!(outcome.table_recreated);
        assert!(!outcome.rows_deleted);
        assert_eq!(dest.calls(), vec!["table_exists", "create_table"]);
    }

    #[tokio::test]
    async fn append_leaves_existing_table_untouched() {
        let dest = destination();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        dest.seed_table(schema.clone(), vec![seeded_row(&schema, &["1"])]);
        let config = load_config("ignored.csv", TABLE);

        let outcome = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap();

        assert_eq!(outcome, Default::default());
        assert_eq!(dest.calls(), vec!["table_exists"]);
        assert_eq!(dest.row_count(TABLE), 1);
    }

    #[tokio::test]
    async fn delete_rows_on_missing_table_creates_instead() {
        // Policy order: create-when-missing is evaluated before the delete
        // branch, so there is nothing to truncate.
        let dest = destination();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        let mut config = load_config("ignored.csv", TABLE);
        config.delete_rows = true;

        let outcome = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap();

        assert!(outcome.table_recreated);
        assert!(!outcome.rows_deleted);
        assert!(!dest.calls().contains(&"truncate_table".to_string()));
    }

    #[tokio::test]
    async fn drop_branch_never_evaluates_delete_mode() {
        let dest = destination();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        let mut config = load_config("ignored.csv", TABLE);
        config.drop_table = true;
        config.delete_rows = true;
        config.delete_mode = "bogus".to_string();

        let outcome = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap();

        assert!(outcome.table_recreated);
    }

    #[tokio::test]
    async fn delete_mode_is_validated_case_insensitively() {
        let dest = destination();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        dest.seed_table(schema.clone(), vec![seeded_row(&schema, &["1"])]);
        let mut config = load_config("ignored.csv", TABLE);
        config.delete_rows = true;
        config.delete_mode = "truncate".to_string();

        let outcome = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap();

        assert!(outcome.rows_deleted);
        assert_eq!(dest.row_count(TABLE), 0);
    }

    #[tokio::test]
    async fn unknown_delete_mode_is_rejected_when_reached() {
        let dest = destination();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        dest.seed_table(schema.clone(), vec![seeded_row(&schema, &["1"])]);
        let mut config = load_config("ignored.csv", TABLE);
        config.delete_rows = true;
        config.delete_mode = "DELETE".to_string();

        let err = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap_err();

        assert!(matches!(err, LifecycleError::UnsupportedDeleteMode(_)));
        assert!(!err.leaves_indeterminate());
        assert_eq!(dest.row_count(TABLE), 1);
    }

    #[tokio::test]
    async fn failed_create_after_drop_is_indeterminate() {
        let dest = destination();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        dest.seed_table(schema.clone(), vec![seeded_row(&schema, &["1"])]);
        dest.fail_create();
        let mut config = load_config("ignored.csv", TABLE);
        config.drop_table = true;

        let err = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap_err();

        assert!(err.leaves_indeterminate());
    }

    #[tokio::test]
    async fn failed_create_on_missing_table_is_not_indeterminate() {
        let dest = destination();
        dest.fail_create();
        let schema = table_schema(TABLE, &[("id", DataType::Long)]);
        let config = load_config("ignored.csv", TABLE);

        let err = lifecycle::ensure_table(&dest, &schema, &config)
            .await
            .unwrap_err();

        assert!(matches!(err, LifecycleError::CreateFailed { .. }));
        assert!(!err.leaves_indeterminate());
    }
}
