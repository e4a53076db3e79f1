//! Export job lifecycle
//!
//! `ExportJobService` wraps an [`ExportJobManager`] with the workflows the
//! CLI exposes: create, start and wait, list, bulk start, cancel, delete
//! output and settings lookup. Service refusals are reported through the
//! [`StatusReporter`] and turned into domain errors.

use crate::adapters::export_service::{ExportJobManager, ServiceResponse};
use crate::config::CourierConfig;
use crate::core::polling::{PollConfig, PollOutcome, PollingCoordinator};
use crate::core::reporting::StatusReporter;
use crate::core::runner::{BulkRunSummary, ConcurrentJobRunner};
use crate::domain::ids::{JobId, WorkspaceId};
use crate::domain::{CourierError, ExportJobSettings, JobHandle, JobStatusSnapshot, Result};
use futures::future::join_all;
use std::sync::Arc;

/// Job lifecycle operations scoped to one workspace
pub struct ExportJobService {
    manager: Arc<dyn ExportJobManager>,
    reporter: Arc<dyn StatusReporter>,
    poll_config: PollConfig,
    workspace_id: WorkspaceId,
    application_name: String,
}

impl ExportJobService {
    pub fn new(
        manager: Arc<dyn ExportJobManager>,
        reporter: Arc<dyn StatusReporter>,
        poll_config: PollConfig,
        workspace_id: WorkspaceId,
        application_name: impl Into<String>,
    ) -> Self {
        Self {
            manager,
            reporter,
            poll_config,
            workspace_id,
            application_name: application_name.into(),
        }
    }

    /// Builds a service from the `[job]` and `[polling]` sections
    pub fn from_config(
        config: &CourierConfig,
        manager: Arc<dyn ExportJobManager>,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        Self::new(
            manager,
            reporter,
            PollConfig::from_config(&config.polling),
            config.job.workspace_id,
            config.job.application_name.clone(),
        )
    }

    pub fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    fn handle(&self, job_id: JobId) -> JobHandle {
        JobHandle::new(self.workspace_id, job_id)
    }

    /// Creates a job with a fresh ID
    ///
    /// Settings are checked locally first. When the service rejects them,
    /// the error and each field-level problem are reported before returning
    /// [`CourierError::Validation`].
    pub async fn create_job(
        &self,
        settings: &ExportJobSettings,
        correlation_id: &str,
    ) -> Result<JobHandle> {
        settings.validate()?;

        let job_id = JobId::generate();
        let validation = self
            .manager
            .create(
                self.workspace_id,
                job_id,
                settings,
                &self.application_name,
                correlation_id,
            )
            .await?;

        if !validation.is_success {
            let summary = validation.error_summary();
            self.reporter.report_error(&summary);
            for (field, problem) in &validation.validation_errors {
                self.reporter.report_error(&format!("{field}: {problem}"));
            }
            tracing::warn!(
                job_id = %job_id,
                problems = validation.validation_errors.len(),
                "Export job rejected"
            );
            return Err(CourierError::Validation(summary));
        }

        tracing::info!(job_id = %job_id, correlation_id, "Export job created");
        Ok(self.handle(job_id).with_correlation_id(correlation_id))
    }

    /// Creates `count` jobs concurrently, correlation IDs suffixed `-1..=count`
    ///
    /// Returns one result per job in correlation order. A rejected create
    /// is reported and leaves the other creates untouched.
    pub async fn create_jobs_concurrently(
        &self,
        settings: &ExportJobSettings,
        correlation_prefix: &str,
        count: usize,
    ) -> Vec<Result<JobHandle>> {
        let correlation_ids: Vec<String> = (1..=count)
            .map(|n| format!("{correlation_prefix}-{n}"))
            .collect();

        join_all(
            correlation_ids
                .iter()
                .map(|correlation_id| self.create_job(settings, correlation_id)),
        )
        .await
    }

    /// Starts a job, failing when the service refuses
    pub async fn start_job(&self, job_id: JobId) -> Result<()> {
        let response = self.manager.start(self.workspace_id, job_id).await?;
        self.ensure_accepted(job_id, "start", &response, response.has_error())?;
        tracing::info!(job_id = %job_id, "Export job started");
        Ok(())
    }

    /// Polls a started job until it reaches a terminal status
    pub async fn wait_for_job(&self, job_id: JobId) -> Result<PollOutcome> {
        let coordinator = PollingCoordinator::new(self.poll_config.clone(), self.reporter.clone());
        let manager = self.manager.as_ref();
        let workspace_id = self.workspace_id;
        coordinator
            .wait_for_completion(job_id, || manager.get(workspace_id, job_id))
            .await
    }

    /// Starts a created job and waits for it to finish
    pub async fn start_and_wait(&self, job_id: JobId) -> Result<PollOutcome> {
        self.start_job(job_id).await?;
        self.wait_for_job(job_id).await
    }

    /// Creates, starts and polls one job
    pub async fn run_job(
        &self,
        settings: &ExportJobSettings,
        correlation_id: &str,
    ) -> Result<PollOutcome> {
        let handle = self.create_job(settings, correlation_id).await?;
        self.start_and_wait(handle.job_id).await
    }

    /// Current status of a job
    pub async fn job_status(&self, job_id: JobId) -> Result<JobStatusSnapshot> {
        self.manager.get(self.workspace_id, job_id).await
    }

    /// One page of jobs of the workspace
    pub async fn list_jobs(&self, offset: usize, limit: usize) -> Result<Vec<JobStatusSnapshot>> {
        let list = self.manager.list(self.workspace_id, offset, limit).await?;
        tracing::debug!(count = list.jobs.len(), offset, limit, "Listed export jobs");
        Ok(list.jobs)
    }

    /// Jobs of the first page that have not been started yet
    pub async fn runnable_jobs(&self, limit: usize) -> Result<Vec<JobHandle>> {
        Ok(self
            .list_jobs(0, limit)
            .await?
            .into_iter()
            .filter(|job| job.job_status.is_runnable())
            .map(|job| {
                let handle = self.handle(job.id);
                match job.correlation_id {
                    Some(correlation_id) => handle.with_correlation_id(correlation_id),
                    None => handle,
                }
            })
            .collect())
    }

    /// Starts and polls every handle concurrently
    pub async fn start_all(&self, handles: Vec<JobHandle>) -> BulkRunSummary {
        ConcurrentJobRunner::new(
            self.manager.clone(),
            self.poll_config.clone(),
            self.reporter.clone(),
        )
        .run_all(handles)
        .await
    }

    /// Requests cancellation and returns the job status afterwards
    pub async fn cancel_job(&self, job_id: JobId) -> Result<JobStatusSnapshot> {
        let response = self.manager.cancel(self.workspace_id, job_id).await?;
        self.ensure_accepted(job_id, "cancel", &response, response.is_refused())?;
        tracing::info!(job_id = %job_id, "Export job cancellation requested");
        self.job_status(job_id).await
    }

    /// Deletes the output files of a finished job
    pub async fn delete_job_output(&self, job_id: JobId) -> Result<()> {
        let response = self.manager.delete(self.workspace_id, job_id).await?;
        self.ensure_accepted(job_id, "delete", &response, response.is_refused())?;
        tracing::info!(job_id = %job_id, "Export job output deleted");
        Ok(())
    }

    /// Settings a job was created with
    pub async fn job_settings(&self, job_id: JobId) -> Result<ExportJobSettings> {
        self.manager.get_settings(self.workspace_id, job_id).await
    }

    /// Start is judged by its error message alone; cancel and delete also by `IsSuccess`
    fn ensure_accepted(
        &self,
        job_id: JobId,
        action: &str,
        response: &ServiceResponse,
        refused: bool,
    ) -> Result<()> {
        if refused {
            let summary = response.error_summary();
            self.reporter.report_error(&summary);
            tracing::warn!(job_id = %job_id, action, error = %summary, "Export service refused request");
            return Err(CourierError::Job(format!(
                "Failed to {action} job {job_id}: {summary}"
            )));
        }
        Ok(())
    }
}
