use brigade_core::{
    domain::common::BrigadeConfig,
    infrastructure::db::{Store, StoreConfig},
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command, LogArgs};

mod args;

fn init_logger(log: &LogArgs) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn migrate(config: BrigadeConfig) -> Result<(), anyhow::Error> {
    let store = Store::connect(StoreConfig::from(&config.database)).await?;
    store.apply_schema().await?;
    info!("schema is up to date");
    store.close().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logger(&args.log);

    let command = args.command.clone();
    let config = BrigadeConfig::from(args);

    match command {
        Command::Migrate => migrate(config).await,
    }
}
