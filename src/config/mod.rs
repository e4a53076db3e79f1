//! Configuration management for Courier.
//!
//! Courier uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `COURIER_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use courier::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("courier.toml")?;
//! println!("Service: {}", config.service.base_url);
//! println!("Poll interval: {} ms", config.polling.interval_ms);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`ServiceConfig`] - export service URL, credentials, timeout, TLS
//! - [`PollingConfig`] - poll interval, retry budget and delay, progress tick
//! - [`JobConfig`] - workspace, application name, correlation ID, export settings
//! - [`BulkConfig`] - bulk creation count and list page size
//! - [`LoggingConfig`] - local JSON log file
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [service]
//! base_url = "https://relativity.example.com/Relativity.REST/api"
//! username = "export.user@example.com"
//! password = "${COURIER_SERVICE_PASSWORD}"
//!
//! [polling]
//! interval_ms = 5000
//!
//! [job]
//! workspace_id = 1020245
//!
//! [job.settings.ExportSourceSettings]
//! ExportSourceType = "Folder"
//! ExportSourceArtifactID = 1003697
//! ViewID = 1042326
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, BulkConfig, CourierConfig, Environment, JobConfig, LoggingConfig,
    PollingConfig, ServiceConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
