//! Poll-until-terminal loop
//!
//! `PollingCoordinator` repeatedly calls a status-fetch operation until the
//! job reaches a terminal status. Failed fetches are retried after a fixed
//! delay; the retry budget counts consecutive failures only and is refilled
//! by every successful fetch.

use super::progress::ProgressReporter;
use crate::config::PollingConfig;
use crate::core::reporting::StatusReporter;
use crate::domain::ids::JobId;
use crate::domain::{ExportStatus, JobStatusSnapshot, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Polling parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Wait after a non-terminal snapshot
    pub interval: Duration,

    /// Wait after a failed fetch
    pub retry_delay: Duration,

    /// Consecutive failed fetches tolerated
    pub max_retries: u32,

    /// Progress line tick
    pub progress_interval: Duration,

    /// Run the progress side-task
    pub report_progress: bool,
}

impl PollConfig {
    /// Builds polling parameters from the `[polling]` section
    pub fn from_config(config: &PollingConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            max_retries: config.max_retries,
            progress_interval: Duration::from_millis(config.progress_interval_ms),
            report_progress: config.report_progress,
        }
    }

    /// Sets the poll interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Disables the progress side-task
    pub fn without_progress(mut self) -> Self {
        self.report_progress = false;
        self
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::from_config(&PollingConfig::default())
    }
}

/// Result of polling a job to completion
#[derive(Debug, Clone)]
pub struct PollOutcome {
    /// Terminal snapshot
    pub snapshot: JobStatusSnapshot,

    /// Fetch calls made, failed ones included
    pub attempts: u32,

    /// Retries consumed over the whole run
    pub retries: u32,

    pub elapsed: Duration,
}

/// Drives a status-fetch operation until the job reaches a terminal status
///
/// # Example
///
/// ```no_run
/// use courier::adapters::export_service::{ExportJobManager, HttpExportJobManager};
/// use courier::config::load_config;
/// use courier::core::polling::{PollConfig, PollingCoordinator};
/// use courier::core::reporting::ConsoleReporter;
/// use courier::domain::JobId;
/// use std::sync::Arc;
///
/// # async fn example(job_id: JobId) -> courier::domain::Result<()> {
/// let config = load_config("courier.toml")?;
/// let manager = HttpExportJobManager::new(&config.service)?;
/// let coordinator = PollingCoordinator::new(
///     PollConfig::from_config(&config.polling),
///     Arc::new(ConsoleReporter::new()),
/// );
///
/// let workspace_id = config.job.workspace_id;
/// let outcome = coordinator
///     .wait_for_completion(job_id, || manager.get(workspace_id, job_id))
///     .await?;
/// println!("Finished as {}", outcome.snapshot.job_status);
/// # Ok(())
/// # }
/// ```
pub struct PollingCoordinator {
    config: PollConfig,
    reporter: Arc<dyn StatusReporter>,
}

impl PollingCoordinator {
    pub fn new(config: PollConfig, reporter: Arc<dyn StatusReporter>) -> Self {
        Self { config, reporter }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Polls until `fetch` yields a terminal snapshot
    ///
    /// A `Failed` snapshot is reported through the reporter and returned
    /// normally. The progress side-task is stopped before returning on every
    /// path.
    ///
    /// # Errors
    ///
    /// Returns the error of the fetch that exceeded the retry budget.
    pub async fn wait_for_completion<F, Fut>(&self, job_id: JobId, mut fetch: F) -> Result<PollOutcome>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<JobStatusSnapshot>>,
    {
        let progress = self
            .config
            .report_progress
            .then(|| ProgressReporter::spawn(self.reporter.clone(), self.config.progress_interval));

        let result = self.poll_loop(job_id, &mut fetch, progress.as_ref()).await;

        if let Some(progress) = progress {
            progress.stop().await;
        }

        let outcome = result?;

        if outcome.snapshot.job_status == ExportStatus::Failed {
            let message = outcome
                .snapshot
                .error_summary()
                .unwrap_or_else(|| format!("Export job {job_id} failed"));
            self.reporter.report_error(&message);
        }

        tracing::info!(
            job_id = %job_id,
            status = %outcome.snapshot.job_status,
            attempts = outcome.attempts,
            retries = outcome.retries,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Export job reached terminal status"
        );

        Ok(outcome)
    }

    async fn poll_loop<F, Fut>(
        &self,
        job_id: JobId,
        fetch: &mut F,
        progress: Option<&ProgressReporter>,
    ) -> Result<PollOutcome>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<JobStatusSnapshot>>,
    {
        let started = Instant::now();
        let mut retries_left = self.config.max_retries;
        let mut attempts = 0u32;
        let mut retries = 0u32;

        loop {
            if let Some(progress) = progress {
                progress.restart_stopwatch();
            }
            attempts += 1;

            match fetch().await {
                Ok(snapshot) => {
                    retries_left = self.config.max_retries;
                    crate::log_job_status!(job_id, snapshot.job_status);
                    self.reporter.report_info(&format!(
                        "Export job ID: {job_id}\nJob status: {}",
                        snapshot.job_status
                    ));

                    if snapshot.is_terminal() {
                        return Ok(PollOutcome {
                            snapshot,
                            attempts,
                            retries,
                            elapsed: started.elapsed(),
                        });
                    }

                    tokio::time::sleep(self.config.interval).await;
                }
                Err(e) if retries_left > 0 => {
                    retries_left -= 1;
                    retries += 1;
                    crate::log_retry_attempt!(
                        self.config.max_retries - retries_left,
                        self.config.max_retries,
                        e.to_string()
                    );
                    self.reporter.report_warning(&format!(
                        "Retrying job status fetching ({retries_left} retries left)"
                    ));
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        job_id = %job_id,
                        attempts = attempts,
                        error = %e,
                        "Giving up on job status fetching"
                    );
                    return Err(e);
                }
            }
        }
    }
}
