//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CourierConfig;
use super::secret::secret_string;
use crate::domain::errors::CourierError;
use crate::domain::result::Result;
use crate::domain::WorkspaceId;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CourierConfig
/// 4. Applies environment variable overrides (COURIER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `CourierError::Configuration` if the file is missing or unreadable,
/// a referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use courier::config::loader::load_config;
///
/// let config = load_config("courier.toml")?;
/// println!("Workspace: {}", config.job.workspace_id);
/// # Ok::<(), courier::domain::CourierError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CourierConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CourierError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CourierError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<CourierConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CourierConfig = toml::from_str(&contents)
        .map_err(|e| CourierError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CourierError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CourierError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CourierError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads an override and parses it, rejecting malformed values
fn parsed_override<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| CourierError::Configuration(format!("Invalid value for {name}: {e}"))),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using COURIER_* prefix
///
/// Environment variables follow the pattern: COURIER_<SECTION>_<KEY>
/// For example: COURIER_SERVICE_BASE_URL, COURIER_POLLING_INTERVAL_MS
fn apply_env_overrides(config: &mut CourierConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("COURIER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Service overrides
    if let Ok(val) = std::env::var("COURIER_SERVICE_BASE_URL") {
        config.service.base_url = val;
    }
    if let Ok(val) = std::env::var("COURIER_SERVICE_USERNAME") {
        config.service.username = val;
    }
    if let Ok(val) = std::env::var("COURIER_SERVICE_PASSWORD") {
        config.service.password = secret_string(val);
    }
    if let Some(val) = parsed_override("COURIER_SERVICE_TIMEOUT_SECONDS")? {
        config.service.timeout_seconds = val;
    }
    if let Some(val) = parsed_override("COURIER_SERVICE_TLS_VERIFY")? {
        config.service.tls_verify = val;
    }

    // Polling overrides
    if let Some(val) = parsed_override("COURIER_POLLING_INTERVAL_MS")? {
        config.polling.interval_ms = val;
    }
    if let Some(val) = parsed_override("COURIER_POLLING_RETRY_DELAY_MS")? {
        config.polling.retry_delay_ms = val;
    }
    if let Some(val) = parsed_override("COURIER_POLLING_MAX_RETRIES")? {
        config.polling.max_retries = val;
    }
    if let Some(val) = parsed_override("COURIER_POLLING_PROGRESS_INTERVAL_MS")? {
        config.polling.progress_interval_ms = val;
    }
    if let Some(val) = parsed_override("COURIER_POLLING_REPORT_PROGRESS")? {
        config.polling.report_progress = val;
    }

    // Job overrides
    if let Ok(val) = std::env::var("COURIER_JOB_WORKSPACE_ID") {
        config.job.workspace_id = val.parse::<WorkspaceId>().map_err(|e| {
            CourierError::Configuration(format!("Invalid value for COURIER_JOB_WORKSPACE_ID: {e}"))
        })?;
    }
    if let Ok(val) = std::env::var("COURIER_JOB_APPLICATION_NAME") {
        config.job.application_name = val;
    }
    if let Ok(val) = std::env::var("COURIER_JOB_CORRELATION_ID") {
        config.job.correlation_id = val;
    }

    // Bulk overrides
    if let Some(val) = parsed_override("COURIER_BULK_CREATE_JOBS")? {
        config.bulk.create_jobs = val;
    }
    if let Some(val) = parsed_override("COURIER_BULK_LIST_LIMIT")? {
        config.bulk.list_limit = val;
    }

    // Logging overrides
    if let Some(val) = parsed_override("COURIER_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Ok(val) = std::env::var("COURIER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("COURIER_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
