//! Export job manager trait definition
//!
//! `ExportJobManager` abstracts the remote job manager so the polling and
//! bulk-run logic can be driven by the HTTP client or by an in-memory fake.

use super::models::{JobList, ServiceResponse, ValidationResult};
use crate::domain::ids::{JobId, WorkspaceId};
use crate::domain::{ExportJobSettings, JobStatusSnapshot, Result};
use async_trait::async_trait;

/// Remote export job manager
///
/// Every method is a single remote call. Errors are transport or protocol
/// failures; a refusal by the service (e.g. starting a job twice) comes back
/// as a response with `error_code` and `error_message` set.
///
/// # Example
///
/// ```no_run
/// use courier::adapters::export_service::{ExportJobManager, HttpExportJobManager};
/// use courier::config::load_config;
/// use courier::domain::JobId;
///
/// # async fn example() -> courier::domain::Result<()> {
/// let config = load_config("courier.toml")?;
/// let manager = HttpExportJobManager::new(&config.service)?;
///
/// let job_id = JobId::generate();
/// let workspace_id = config.job.workspace_id;
/// let validation = manager
///     .create(workspace_id, job_id, &config.job.settings, "app", "corr")
///     .await?;
/// if validation.is_success {
///     manager.start(workspace_id, job_id).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ExportJobManager: Send + Sync {
    /// Creates a job without starting it
    async fn create(
        &self,
        workspace_id: WorkspaceId,
        job_id: JobId,
        settings: &ExportJobSettings,
        application_name: &str,
        correlation_id: &str,
    ) -> Result<ValidationResult>;

    /// Starts a job in `New` status
    async fn start(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse>;

    /// Fetches the current status of a job
    async fn get(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<JobStatusSnapshot>;

    /// Requests cancellation of a running job
    async fn cancel(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse>;

    /// Lists jobs of a workspace, `limit` entries starting at `offset`
    async fn list(&self, workspace_id: WorkspaceId, offset: usize, limit: usize) -> Result<JobList>;

    /// Deletes the output files of a job
    async fn delete(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse>;

    /// Fetches the settings a job was created with
    async fn get_settings(
        &self,
        workspace_id: WorkspaceId,
        job_id: JobId,
    ) -> Result<ExportJobSettings>;
}
