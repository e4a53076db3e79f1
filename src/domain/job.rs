//! Export job domain model
//!
//! Point-in-time job views as returned by the export service, the fixed set
//! of terminal statuses, and the handle a caller keeps while a job runs.

use super::ids::{JobId, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a remote export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportStatus {
    /// Created but not started; the only status a job can be started from
    New,
    /// Queued by the service
    Scheduled,
    /// Export in progress
    Running,
    /// Files being moved to the destination
    Transferring,
    /// Finished without errors
    Completed,
    /// Finished, some records failed
    CompletedWithErrors,
    /// Job failed; see the snapshot's error code and message
    Failed,
    /// Job was cancelled
    Cancelled,
}

/// Statuses that end polling
pub const TERMINAL_STATES: [ExportStatus; 4] = [
    ExportStatus::Completed,
    ExportStatus::CompletedWithErrors,
    ExportStatus::Failed,
    ExportStatus::Cancelled,
];

impl ExportStatus {
    /// Whether this status is in [`TERMINAL_STATES`]
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATES.contains(self)
    }

    /// Whether a job in this status can be started
    pub fn is_runnable(&self) -> bool {
        matches!(self, ExportStatus::New)
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportStatus::New => "New",
            ExportStatus::Scheduled => "Scheduled",
            ExportStatus::Running => "Running",
            ExportStatus::Transferring => "Transferring",
            ExportStatus::Completed => "Completed",
            ExportStatus::CompletedWithErrors => "CompletedWithErrors",
            ExportStatus::Failed => "Failed",
            ExportStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Where the service placed a job's exported files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobOutput {
    /// Location of the export output, once available
    #[serde(default)]
    pub output_url: Option<String>,
}

/// Point-in-time view of a remote export job
///
/// Produced by every status fetch and superseded by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobStatusSnapshot {
    /// Job identifier
    #[serde(rename = "ID")]
    pub id: JobId,

    /// Current status
    pub job_status: ExportStatus,

    /// Application that created the job
    #[serde(default)]
    pub application_name: Option<String>,

    /// Caller-supplied correlation ID
    #[serde(rename = "CorrelationID", default)]
    pub correlation_id: Option<String>,

    #[serde(default)]
    pub job_errors_count: Option<u64>,

    #[serde(default)]
    pub total_records: Option<u64>,

    #[serde(default)]
    pub processed_records: Option<u64>,

    #[serde(default)]
    pub records_with_errors: Option<u64>,

    #[serde(default)]
    pub records_with_warnings: Option<u64>,

    #[serde(default)]
    pub exported_files_count: Option<u64>,

    /// Total size of exported files in bytes
    #[serde(default)]
    pub total_size_of_exported_files: Option<u64>,

    /// Service error code, set when the job failed
    #[serde(default)]
    pub error_code: Option<String>,

    /// Service error message, set when the job failed
    #[serde(default)]
    pub error_message: Option<String>,

    /// Output descriptor
    #[serde(default)]
    pub export_job_output: Option<JobOutput>,

    /// Whether the output files were deleted after the export
    #[serde(default)]
    pub is_output_deleted: bool,

    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

impl JobStatusSnapshot {
    /// Creates a snapshot with only ID and status set
    pub fn new(id: JobId, job_status: ExportStatus) -> Self {
        Self {
            id,
            job_status,
            application_name: None,
            correlation_id: None,
            job_errors_count: None,
            total_records: None,
            processed_records: None,
            records_with_errors: None,
            records_with_warnings: None,
            exported_files_count: None,
            total_size_of_exported_files: None,
            error_code: None,
            error_message: None,
            export_job_output: None,
            is_output_deleted: false,
            created_on: None,
        }
    }

    /// Sets the error code and message
    pub fn with_error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self.error_message = Some(message.into());
        self
    }

    /// Sets the record counters
    pub fn with_records(mut self, total: u64, processed: u64, errors: u64, warnings: u64) -> Self {
        self.total_records = Some(total);
        self.processed_records = Some(processed);
        self.records_with_errors = Some(errors);
        self.records_with_warnings = Some(warnings);
        self
    }

    /// Whether the job reached a terminal status
    pub fn is_terminal(&self) -> bool {
        self.job_status.is_terminal()
    }

    /// Output URL, if the service reported one
    pub fn output_url(&self) -> Option<&str> {
        self.export_job_output
            .as_ref()
            .and_then(|o| o.output_url.as_deref())
    }

    /// `"<code> - <message>"` when the service reported an error
    pub fn error_summary(&self) -> Option<String> {
        match (self.error_code.as_deref(), self.error_message.as_deref()) {
            (None, None) => None,
            (Some(code), None) if code.is_empty() => None,
            (None, Some(message)) if message.is_empty() => None,
            (code, message) => Some(format!(
                "{} - {}",
                code.unwrap_or_default(),
                message.unwrap_or_default()
            )),
        }
    }

    /// Splits processed records into clean, errored and warned
    pub fn record_breakdown(&self) -> RecordBreakdown {
        let with_errors = self.records_with_errors.unwrap_or(0);
        let with_warnings = self.records_with_warnings.unwrap_or(0);
        let clean = self
            .processed_records
            .unwrap_or(0)
            .saturating_sub(with_errors)
            .saturating_sub(with_warnings);

        RecordBreakdown {
            clean,
            with_errors,
            with_warnings,
        }
    }
}

/// Record counts of a finished job, partitioned for reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordBreakdown {
    /// Processed records with neither errors nor warnings
    pub clean: u64,
    pub with_errors: u64,
    pub with_warnings: u64,
}

/// Opaque handle on a remotely executing job
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle {
    pub workspace_id: WorkspaceId,
    pub job_id: JobId,
    pub correlation_id: Option<String>,
}

impl JobHandle {
    /// Creates a handle without correlation ID
    pub fn new(workspace_id: WorkspaceId, job_id: JobId) -> Self {
        Self {
            workspace_id,
            job_id,
            correlation_id: None,
        }
    }

    /// Sets the correlation ID
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workspace_id, self.job_id)
    }
}
