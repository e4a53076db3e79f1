//! Bulk run summary and reporting
//!
//! Per-job results of a bulk run and the status breakdown built from them.

use crate::domain::ids::JobId;
use crate::domain::{ExportStatus, JobStatusSnapshot};
use std::time::Duration;

/// Outcome of one job in a bulk run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnableJobResult {
    pub job_id: JobId,

    /// Formatted job summary, or the reason the job did not finish
    pub message: String,

    /// Terminal status; `None` when the job was not started or polling failed
    pub status: Option<ExportStatus>,
}

impl RunnableJobResult {
    /// Result of a job polled to a terminal status
    pub fn finished(snapshot: &JobStatusSnapshot) -> Self {
        Self {
            job_id: snapshot.id,
            message: format_job_summary(snapshot),
            status: Some(snapshot.job_status),
        }
    }

    /// Result of a job that was refused, never started or lost while polling
    pub fn not_run(job_id: JobId, message: impl Into<String>) -> Self {
        Self {
            job_id,
            message: message.into(),
            status: None,
        }
    }
}

/// Multi-line summary of a finished job
pub fn format_job_summary(snapshot: &JobStatusSnapshot) -> String {
    let mut lines = vec![
        format!("Export job ID: {}", snapshot.id),
        format!(
            "Correlation ID: {}",
            snapshot.correlation_id.as_deref().unwrap_or_default()
        ),
        format!("Job status: {}", snapshot.job_status),
        format!("Job error count: {}", snapshot.job_errors_count.unwrap_or(0)),
        format!("Total records: {}", snapshot.total_records.unwrap_or(0)),
        format!(
            "Processed records: {}",
            snapshot.processed_records.unwrap_or(0)
        ),
        format!(
            "Records with warnings: {}",
            snapshot.records_with_warnings.unwrap_or(0)
        ),
        format!(
            "Records with errors: {}",
            snapshot.records_with_errors.unwrap_or(0)
        ),
        format!("Output URL: {}", snapshot.output_url().unwrap_or_default()),
    ];

    if let Some(error) = snapshot.error_summary() {
        lines.push(format!("Error: {error}"));
    }

    lines.join("\n")
}

/// Count of results per final status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub completed: usize,
    pub completed_with_errors: usize,
    pub failed: usize,
    pub cancelled: usize,
    /// Results without a terminal status
    pub not_run: usize,
}

impl StatusBreakdown {
    /// Tallies results by status
    pub fn from_results(results: &[RunnableJobResult]) -> Self {
        let mut breakdown = Self::default();
        for result in results {
            match result.status {
                Some(ExportStatus::Completed) => breakdown.completed += 1,
                Some(ExportStatus::CompletedWithErrors) => breakdown.completed_with_errors += 1,
                Some(ExportStatus::Failed) => breakdown.failed += 1,
                Some(ExportStatus::Cancelled) => breakdown.cancelled += 1,
                _ => breakdown.not_run += 1,
            }
        }
        breakdown
    }

    /// Labelled counts in display order
    pub fn entries(&self) -> [(&'static str, usize); 5] {
        [
            ("Completed", self.completed),
            ("Completed with errors", self.completed_with_errors),
            ("Failed", self.failed),
            ("Cancelled", self.cancelled),
            ("Not run", self.not_run),
        ]
    }

    pub fn total(&self) -> usize {
        self.completed + self.completed_with_errors + self.failed + self.cancelled + self.not_run
    }
}

/// Summary of a bulk run
#[derive(Debug, Clone)]
pub struct BulkRunSummary {
    /// One entry per job, in completion order
    pub results: Vec<RunnableJobResult>,

    pub breakdown: StatusBreakdown,

    pub duration: Duration,
}

impl BulkRunSummary {
    pub fn new(results: Vec<RunnableJobResult>, duration: Duration) -> Self {
        let breakdown = StatusBreakdown::from_results(&results);
        Self {
            results,
            breakdown,
            duration,
        }
    }

    /// All job messages separated by blank lines
    pub fn final_message(&self) -> String {
        self.results
            .iter()
            .map(|r| r.message.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Whether every job completed without errors
    pub fn is_successful(&self) -> bool {
        self.breakdown.completed == self.results.len()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.results.len(),
            completed = self.breakdown.completed,
            completed_with_errors = self.breakdown.completed_with_errors,
            failed = self.breakdown.failed,
            cancelled = self.breakdown.cancelled,
            not_run = self.breakdown.not_run,
            duration_secs = self.duration.as_secs(),
            "Bulk run completed"
        );

        for result in self.results.iter().filter(|r| r.status.is_none()) {
            tracing::warn!(
                job_id = %result.job_id,
                message = %result.message,
                "Job did not reach a terminal status"
            );
        }
    }
}
