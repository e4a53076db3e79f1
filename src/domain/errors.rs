//! Domain error types
//!
//! This module defines the error hierarchy for Courier.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Courier error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CourierError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Export service errors
    #[error("Export service error: {0}")]
    ExportService(#[from] ExportServiceError),

    /// Job settings or job creation rejected by validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Job lifecycle errors (start refused, polling gave up, ...)
    #[error("Job error: {0}")]
    Job(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Export service errors
///
/// Errors that occur when talking to the remote export service.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum ExportServiceError {
    /// Failed to connect to the export service
    #[error("Failed to connect to export service: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from server
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Export job not found
    #[error("Export job not found: {0}")]
    JobNotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl CourierError {
    /// Exit code the CLI should use when this error ends a command
    pub fn exit_code(&self) -> i32 {
        match self {
            CourierError::Configuration(_) => 2,
            CourierError::ExportService(
                ExportServiceError::ConnectionFailed(_)
                | ExportServiceError::AuthenticationFailed(_)
                | ExportServiceError::Timeout(_),
            ) => 4,
            CourierError::Validation(_) | CourierError::Job(_) => 1,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CourierError {
    fn from(err: std::io::Error) -> Self {
        CourierError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CourierError {
    fn from(err: serde_json::Error) -> Self {
        CourierError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CourierError {
    fn from(err: toml::de::Error) -> Self {
        CourierError::Configuration(format!("TOML parse error: {err}"))
    }
}
