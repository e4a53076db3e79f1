//! Domain models and types for Courier.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`WorkspaceId`], [`JobId`])
//! - **Job models** ([`JobStatusSnapshot`], [`ExportStatus`], [`JobHandle`])
//! - **Settings payload** ([`ExportJobSettings`])
//! - **Error types** ([`CourierError`], [`ExportServiceError`])
//! - **Result type alias** ([`Result`])
//!
//! # Terminal states
//!
//! Polling stops once a job reports one of [`TERMINAL_STATES`]:
//!
//! ```rust
//! use courier::domain::ExportStatus;
//!
//! assert!(ExportStatus::CompletedWithErrors.is_terminal());
//! assert!(!ExportStatus::Transferring.is_terminal());
//! ```

pub mod errors;
pub mod ids;
pub mod job;
pub mod result;
pub mod settings;

// Re-export commonly used types for convenience
pub use errors::{CourierError, ExportServiceError};
pub use ids::{JobId, WorkspaceId};
pub use job::{
    ExportStatus, JobHandle, JobOutput, JobStatusSnapshot, RecordBreakdown, TERMINAL_STATES,
};
pub use result::Result;
pub use settings::{ExportJobSettings, SourceType};
