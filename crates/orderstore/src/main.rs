use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use orderstore::cli::{execute, Cli, ErrorMessage};
use orderstore::config::Config;
use orderstore::storage::dynamodb::{create_client, DynamoDbItemStore};
use orderstore::storage::OrderStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orderstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.apply(Config::from_env());
    tracing::debug!(
        table = %config.table_name,
        region = %config.region,
        endpoint = ?config.endpoint_url,
        "Loaded configuration"
    );

    let client = create_client(&config).await;
    let item_store = DynamoDbItemStore::new(client, config.table_name.clone());
    let store = OrderStore::new(item_store, config.order_store_config())?;

    match execute(&store, cli.command).await {
        Ok(output) => {
            tracing::info!(table = store.table_name(), "Command succeeded");
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(table = store.table_name(), error = %err, "Command failed");
            println!("{}", serde_json::to_string_pretty(&ErrorMessage::from(&err))?);
            Ok(ExitCode::FAILURE)
        }
    }
}
