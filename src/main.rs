// Courier - Export job client
// Copyright (c) 2025 Courier Contributors
// Licensed under the MIT License

use courier::cli::commands::LoadedConfig;
use courier::cli::{Cli, Commands};
use courier::config::LoggingConfig;
use courier::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging and the default level come from the config file when it loads;
    // commands report load errors themselves.
    let loaded = cli
        .command
        .needs_config()
        .then(|| LoadedConfig::load(&cli.config));
    let file_config = loaded.as_ref().and_then(|l| l.config.as_ref().ok());
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    let logging_config = file_config
        .map(|c| c.logging.clone())
        .unwrap_or_else(|| LoggingConfig {
            local_enabled: false,
            ..LoggingConfig::default()
        });

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Courier - export job client");

    let exit_code = match execute_command(&cli, loaded).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

async fn execute_command(cli: &Cli, loaded: Option<LoadedConfig>) -> anyhow::Result<i32> {
    let loaded = || loaded.unwrap_or_else(|| LoadedConfig::load(&cli.config));
    match &cli.command {
        Commands::Run(args) => args.execute(loaded()).await,
        Commands::StartAll(args) => args.execute(loaded()).await,
        Commands::List(args) => args.execute(loaded()).await,
        Commands::Cancel(args) => args.execute(loaded()).await,
        Commands::Delete(args) => args.execute(loaded()).await,
        Commands::Settings(args) => args.execute(loaded()).await,
        Commands::ValidateConfig(args) => args.execute(loaded()).await,
        Commands::Init(args) => args.execute().await,
    }
}
