use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;

mod config;
mod logging;
mod server;

use config::AppConfig;
use server::Server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Todo list API server.
#[derive(Parser, Debug)]
#[command(name = "todolist-server", version, about, long_about = None)]
struct Cli {
    /// YAML configuration file; `TODOLIST__*` environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` still wins.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.logging, cli.verbose)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting todolist-server");
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "Loaded configuration file");
    }

    let server = Server::build(&config)?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
        }
        on_signal.cancel();
    });

    server.run(cancel).await?;
    tracing::info!("todolist-server stopped");
    Ok(())
}
