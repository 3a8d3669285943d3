pub mod bootstrap_config;
mod config;
mod loading;

use crate::config::load_config;
use bootstrap_config::BootstrapConfig;
use common::types::config::Config;
use common::util::logging;
use data_harvester::step1_fetch::FetchError;
use data_harvester::step2_import::ImportError;
use log::{error, info};
use std::fmt::{Display, Formatter};
use std::process::ExitCode;
use tokio::signal;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "main", "{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), BikeflowError> {
    let bootstrap_config = BootstrapConfig::read();

    logging::initialize_logging(bootstrap_config.log_level.clone().into());
    print_startup_message();

    let config = load_config(&bootstrap_config)?;

    let app_data = loading::load(&config).await?;

    let Config::Version1 { server: server_config, .. } = &config;
    let (listener, app) = server::build(app_data, &server_config.bind).await?;
    info!(target: "server", "Serving station traffic on http://{}/api/v1/traffic", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(target: "main", "Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(target: "main", "Could not listen for shutdown signal: {}", err);
    }
    info!(target: "main", "Received shutdown signal");
}

fn print_startup_message() {
    info!("\n  _     _ _           __ _               \n | |__ (_) | _____   / _| | _____      __\n | '_ \\| | |/ / _ \\ | |_| |/ _ \\ \\ /\\ / /\n | |_) | |   <  __/ |  _| | (_) \\ V  V / \n |_.__/|_|_|\\_\\___| |_| |_|\\___/ \\_/\\_/  \n\n S T A T I O N   T R A F F I C\n");
}

#[derive(thiserror::Error, Debug)]
pub enum BikeflowError {
    Config(#[from] config::ConfigError),
    Fetch(#[from] FetchError),
    Import(#[from] ImportError),
    IO(#[from] std::io::Error),
    Server(#[from] server::ServerError),
}

impl Display for BikeflowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let err: &dyn Display = match self {
            BikeflowError::Config(err) => err,
            BikeflowError::Fetch(err) => err,
            BikeflowError::Import(err) => err,
            BikeflowError::IO(err) => err,
            BikeflowError::Server(err) => err,
        };
        let prefix = match self {
            BikeflowError::Config(_) => "Reading config file",
            BikeflowError::Fetch(_) => "Fetching datasets",
            BikeflowError::Import(_) => "Importing datasets",
            BikeflowError::IO(_) => "Error during IO",
            BikeflowError::Server(_) => "Error in server",
        };
        write!(f, "{}: {}", prefix, err)
    }
}
