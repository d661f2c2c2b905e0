//! Tarpon - Registry dependency explorer
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tarpon::cli::{Cli, Commands};
use tarpon::config::ConfigManager;
use tarpon::error::TarponResult;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> TarponResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("tarpon=warn"),
        1 => EnvFilter::new("tarpon=info"),
        _ => EnvFilter::new("tarpon=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = manager.load().await?;

    // CLI flag beats config for the registry endpoint
    let registry = cli
        .registry
        .as_deref()
        .unwrap_or(&config.registry.url)
        .to_string();

    // Dispatch to command
    match cli.command {
        Commands::Info(args) => tarpon::cli::commands::info(args, &config, &registry).await,
        Commands::Resolve(args) => tarpon::cli::commands::resolve(args, &config, &registry).await,
        Commands::Graph(args) => tarpon::cli::commands::graph(args, &config, &registry).await,
        Commands::Download(args) => tarpon::cli::commands::download(args, &config, &registry).await,
        Commands::Cache(args) => tarpon::cli::commands::cache(args, &config).await,
        Commands::Config(args) => tarpon::cli::commands::config(args, &config, &manager).await,
    }
}
