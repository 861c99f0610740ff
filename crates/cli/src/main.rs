use crate::{commands::Commands, error::CliError};
use clap::Parser;
use connectors::{secrets::aws::AwsSecretStore, storage::router::StorageRouter};
use engine_core::settings::RuntimeSettings;
use engine_runtime::{driver::JobDriver, factory::PgDestinationFactory, report::RunReport};
use model::execution::job::JobConfig;
use std::sync::Arc;
use tracing::{Level, info};
use uuid::Uuid;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "bulkload",
    version = "0.1.0",
    about = "Chunked CSV to Postgres loader"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Load {
            source_uri,
            secret_handle,
            table_name,
            drop_table,
            delete_rows,
            delete_mode,
            chunk_size,
            json,
        } => {
            let config = JobConfig {
                source_uri,
                table_name,
                drop_table,
                delete_rows,
                delete_mode,
                chunk_size,
            };

            let driver = build_driver().await;
            let run_id = Uuid::new_v4();
            let started_at = chrono::Utc::now();
            info!(%run_id, "Run started");

            let outcome = driver.run(&config, &secret_handle).await;
            let report = RunReport::new(run_id, &config.table_name, started_at, &outcome);
            output::print_report(&report, json)?;

            if outcome.is_err() {
                return Err(CliError::JobFailed);
            }
        }
        Commands::TestConn { secret_handle } => {
            let driver = build_driver().await;
            driver
                .test_connection(&secret_handle)
                .await
                .map_err(CliError::Preflight)?;
            info!("Connection OK");
        }
    }

    Ok(())
}

async fn build_driver() -> JobDriver {
    let settings = RuntimeSettings::default();
    let secrets = Arc::new(AwsSecretStore::from_env().await);
    let storage = Arc::new(StorageRouter::from_env().await);
    let destinations = Arc::new(PgDestinationFactory::new(settings.clone()));
    JobDriver::new(secrets, storage, destinations, settings)
}
