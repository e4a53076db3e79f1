//! Configuration schema types
//!
//! This module defines the configuration structure for Courier.

use crate::config::SecretString;
use crate::domain::{ExportJobSettings, WorkspaceId};
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Courier configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Export service connection
    pub service: ServiceConfig,

    /// Polling behavior shared by single and bulk runs
    #[serde(default)]
    pub polling: PollingConfig,

    /// Job defaults used by `run`, `cancel` and bulk creation
    pub job: JobConfig,

    /// Bulk run settings
    #[serde(default)]
    pub bulk: BulkConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CourierConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.service.validate(&self.environment)?;
        self.polling.validate()?;
        self.job.validate()?;
        self.bulk.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the instance, e.g. `https://host/Relativity.REST/api`
    pub base_url: String,

    /// Username for Basic authentication
    pub username: String,

    /// Password for Basic authentication
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification exposes the application
    /// to man-in-the-middle attacks. Rejected in production environments.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl ServiceConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("service.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("service.base_url must start with http:// or https://".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("service.base_url '{}' is not a valid URL", self.base_url));
        }

        if self.username.trim().is_empty() {
            return Err("service.username cannot be empty".to_string());
        }

        if self.password.expose_secret().is_empty() {
            return Err("service.password cannot be empty".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("service.timeout_seconds must be > 0".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true' or use environment = \"development\" or \"staging\"."
                    .to_string(),
            );
        }

        Ok(())
    }
}

/// Polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between successful status fetches
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Delay after a failed status fetch
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Consecutive failed fetches tolerated before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Tick of the elapsed-time progress line
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// Show the elapsed-time progress line while polling
    #[serde(default = "default_true")]
    pub report_progress: bool,
}

impl PollingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.interval_ms == 0 {
            return Err("polling.interval_ms must be > 0".to_string());
        }
        if self.progress_interval_ms == 0 {
            return Err("polling.progress_interval_ms must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            max_retries: default_max_retries(),
            progress_interval_ms: default_progress_interval_ms(),
            report_progress: true,
        }
    }
}

/// Job defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Workspace every command operates in
    pub workspace_id: WorkspaceId,

    /// Application name sent with created jobs
    #[serde(default = "default_application_name")]
    pub application_name: String,

    /// Correlation ID sent with created jobs
    #[serde(default = "default_correlation_id")]
    pub correlation_id: String,

    /// Export settings of created jobs
    #[serde(default)]
    pub settings: ExportJobSettings,
}

impl JobConfig {
    fn validate(&self) -> Result<(), String> {
        if self.application_name.trim().is_empty() {
            return Err("job.application_name cannot be empty".to_string());
        }
        self.settings
            .validate()
            .map_err(|e| format!("job.settings: {e}"))
    }
}

/// Bulk run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Jobs `start-all` creates before listing when `--create` is not given
    #[serde(default)]
    pub create_jobs: usize,

    /// Page size used to list jobs
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

impl BulkConfig {
    fn validate(&self) -> Result<(), String> {
        if self.list_limit == 0 || self.list_limit > 1000 {
            return Err(format!(
                "bulk.list_limit must be between 1 and 1000, got {}",
                self.list_limit
            ));
        }
        Ok(())
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            create_jobs: 0,
            list_limit: default_list_limit(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_retry_delay_ms() -> u64 {
    3000
}

fn default_max_retries() -> u32 {
    3
}

fn default_progress_interval_ms() -> u64 {
    100
}

fn default_application_name() -> String {
    "Export-Service-Sample-App".to_string()
}

fn default_correlation_id() -> String {
    "Sample-Job-0001".to_string()
}

fn default_list_limit() -> usize {
    1000
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn service() -> ServiceConfig {
        ServiceConfig {
            base_url: "https://host.example.com/Relativity.REST/api".to_string(),
            username: "user@example.com".to_string(),
            password: secret_string("pass".to_string()),
            timeout_seconds: 60,
            tls_verify: true,
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_service_config_validation() {
        assert!(service().validate(&Environment::Development).is_ok());
        assert!(service().validate(&Environment::Production).is_ok());

        let mut config = service();
        config.base_url = "ftp://host".to_string();
        assert!(config.validate(&Environment::Development).is_err());

        let mut config = service();
        config.password = secret_string(String::new());
        assert!(config.validate(&Environment::Development).is_err());

        let mut config = service();
        config.username = "  ".to_string();
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_tls_verification_required_in_production() {
        let mut config = service();
        config.tls_verify = false;
        assert!(config.validate(&Environment::Development).is_ok());

        let err = config.validate(&Environment::Production).unwrap_err();
        assert!(err.contains("TLS certificate verification"));
    }

    #[test]
    fn test_polling_config_defaults() {
        let config = PollingConfig::default();
        assert_eq!(config.interval_ms, 5000);
        assert_eq!(config.retry_delay_ms, 3000);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.progress_interval_ms, 100);
        assert!(config.report_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_polling_interval_must_be_positive() {
        let config = PollingConfig {
            interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bulk_list_limit_bounds() {
        assert!(BulkConfig::default().validate().is_ok());
        let config = BulkConfig {
            create_jobs: 4,
            list_limit: 0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_job_config_rejects_invalid_settings() {
        let mut config = JobConfig {
            workspace_id: WorkspaceId::new(1020245).unwrap(),
            application_name: default_application_name(),
            correlation_id: default_correlation_id(),
            settings: ExportJobSettings::default(),
        };
        assert!(config.validate().is_ok());

        config.settings.artifacts.field_artifact_ids.clear();
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("job.settings"));
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.local_enabled);
        assert_eq!(config.local_path, "./logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let config = LoggingConfig {
            local_rotation: "weekly".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
