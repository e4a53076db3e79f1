//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output on stderr
//! - configurable log levels, `RUST_LOG` overrides
//! - optional JSON log file with rotation
//!
//! # Example
//!
//! ```no_run
//! use courier::logging::init_logging;
//! use courier::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a fetched job status
///
/// # Example
///
/// ```no_run
/// use courier::log_job_status;
/// use courier::domain::{ExportStatus, JobId};
///
/// let job_id = JobId::generate();
/// log_job_status!(job_id, ExportStatus::Running);
/// ```
#[macro_export]
macro_rules! log_job_status {
    ($job_id:expr, $status:expr) => {
        tracing::info!(
            job_id = %$job_id,
            status = %$status,
            "Export job status"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use courier::log_error_with_context;
/// use courier::domain::CourierError;
///
/// let error = CourierError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use courier::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
