//! CLI command implementations
//!
//! One module per subcommand. Commands that talk to the export service share
//! [`CommandContext`] for loading configuration and building the client.

pub mod cancel;
pub mod delete;
pub mod init;
pub mod list;
pub mod run;
pub mod settings;
pub mod start_all;
pub mod validate;

use crate::adapters::export_service::HttpExportJobManager;
use crate::config::{load_config, CourierConfig};
use crate::core::export::ExportJobService;
use crate::core::reporting::{ConsoleReporter, StatusReporter};
use crate::domain::{CourierError, Result};
use std::sync::Arc;

/// A configuration file path and the outcome of loading it
///
/// Loaded once per invocation; logging setup and the command share it.
#[derive(Debug)]
pub struct LoadedConfig {
    pub path: String,
    pub config: Result<CourierConfig>,
}

impl LoadedConfig {
    pub fn load(path: &str) -> Self {
        Self {
            path: path.to_string(),
            config: load_config(path),
        }
    }
}

/// Loaded configuration plus a service bound to the configured workspace
pub struct CommandContext {
    pub config: CourierConfig,
    pub reporter: Arc<ConsoleReporter>,
    pub service: ExportJobService,
}

impl CommandContext {
    /// Takes the loaded configuration and connects the HTTP client
    ///
    /// On failure the problem is printed and the exit code is returned.
    pub fn load(loaded: LoadedConfig) -> std::result::Result<Self, i32> {
        let LoadedConfig { path, config } = loaded;
        let config = config.map_err(|e| {
            tracing::error!(error = %e, config_path = %path, "Failed to load configuration");
            eprintln!("❌ {e}");
            e.exit_code()
        })?;

        let manager = HttpExportJobManager::new(&config.service).map_err(|e| {
            tracing::error!(error = %e, "Failed to create export service client");
            eprintln!("❌ Failed to create export service client: {e}");
            4
        })?;

        let reporter = Arc::new(ConsoleReporter::new());
        let service = ExportJobService::from_config(
            &config,
            Arc::new(manager),
            reporter.clone() as Arc<dyn StatusReporter>,
        );

        Ok(Self {
            config,
            reporter,
            service,
        })
    }
}

/// Prints a failed operation and returns its exit code
pub(crate) fn report_failure(action: &str, error: &CourierError) -> i32 {
    crate::log_error_with_context!(error, action);
    eprintln!("❌ {action}: {error}");
    error.exit_code()
}
