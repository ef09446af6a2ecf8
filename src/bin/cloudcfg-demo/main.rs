// cloudcfg demo - serves files using properties from a cloud config server
// and restarts the server whenever the properties change

mod cli;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use cloudcfg::{CloudClient, CloudClientConfig};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn load_config(cli: &Cli) -> Result<CloudClientConfig> {
    let mut config = match &cli.config {
        Some(path) => CloudClientConfig::from_file(path)?,
        None => CloudClientConfig::new(&cli.server, &cli.app, &cli.profile),
    };
    config.insecure_skip_verify |= cli.insecure;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // The client uses a blocking HTTP client, keep it off the async workers
    let client = tokio::task::spawn_blocking(move || CloudClient::new(config))
        .await
        .context("Client initialization panicked")??;
    let client = Arc::new(client);

    let (tx, mut rx) = mpsc::unbounded_channel();
    client.watch(cli.check_interval, move |_| {
        let _ = tx.send(());
    })?;

    let mut server = server::start(Arc::clone(&client)).await?;
    loop {
        tokio::select! {
            Some(()) = rx.recv() => {
                info!("Properties are updated, restarting server to pick up changes");
                server.shutdown().await?;
                server = server::start(Arc::clone(&client)).await?;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    server.shutdown().await?;
    // Dropping the client joins its background threads
    tokio::task::spawn_blocking(move || drop(client)).await?;
    Ok(())
}
