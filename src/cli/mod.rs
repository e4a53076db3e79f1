//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Courier using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Courier - export job client
#[derive(Parser, Debug)]
#[command(name = "courier")]
#[command(version, about, long_about = None)]
#[command(author = "Courier Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "courier.toml", env = "COURIER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COURIER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, start and poll one export job
    Run(commands::run::RunArgs),

    /// Start every job in New status and poll them concurrently
    StartAll(commands::start_all::StartAllArgs),

    /// List export jobs of the workspace
    List(commands::list::ListArgs),

    /// Cancel an export job
    Cancel(commands::cancel::CancelArgs),

    /// Delete the output files of an export job
    Delete(commands::delete::DeleteArgs),

    /// Print the settings of an export job
    Settings(commands::settings::SettingsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command needs a loadable configuration file
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::Init(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::SourceType;

    const JOB_ID: &str = "6f1c2b0e-5a44-4c8e-9d0f-2b7e0c1d3a55";

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["courier", "run"]);
        assert_eq!(cli.config, "courier.toml");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_run_with_source() {
        let cli = Cli::parse_from([
            "courier",
            "run",
            "--source",
            "saved-search",
            "--source-id",
            "1042541",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.source, Some(SourceType::SavedSearch));
                assert_eq!(args.source_id, Some(1042541));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["courier", "--config", "custom.toml", "list"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["courier", "--log-level", "debug", "list"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_start_all() {
        let cli = Cli::parse_from(["courier", "start-all", "--create", "5"]);
        match cli.command {
            Commands::StartAll(args) => assert_eq!(args.create, Some(5)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_cancel_without_job() {
        let cli = Cli::parse_from(["courier", "cancel"]);
        match cli.command {
            Commands::Cancel(args) => assert!(args.job_id.is_none()),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_delete_requires_job_id() {
        assert!(Cli::try_parse_from(["courier", "delete"]).is_err());
        let cli = Cli::parse_from(["courier", "delete", "--job-id", JOB_ID]);
        match cli.command {
            Commands::Delete(args) => assert_eq!(args.job_id.to_string(), JOB_ID),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_malformed_job_id() {
        assert!(Cli::try_parse_from(["courier", "settings", "--job-id", "nope"]).is_err());
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["courier", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
        assert!(cli.command.needs_config());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["courier", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
        assert!(!cli.command.needs_config());
    }
}
