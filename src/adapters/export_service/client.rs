//! HTTP export job manager
//!
//! `ExportJobManager` over the export service's REST API, using reqwest with
//! Basic authentication.

use super::models::{
    CreateJobRequest, CreateJobValue, JobList, ServiceResponse, ValidationResult, ValueResponse,
};
use super::traits::ExportJobManager;
use crate::config::{SecretString, ServiceConfig};
use crate::domain::ids::{JobId, WorkspaceId};
use crate::domain::{
    CourierError, ExportJobSettings, ExportServiceError, JobStatusSnapshot, Result,
};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Header the service requires on every REST call
const CSRF_HEADER: &str = "X-CSRF-Header";

/// Export job manager backed by the service's REST API
///
/// # Example
///
/// ```no_run
/// use courier::adapters::export_service::{ExportJobManager, HttpExportJobManager};
/// use courier::config::load_config;
///
/// # async fn example() -> courier::domain::Result<()> {
/// let config = load_config("courier.toml")?;
/// let manager = HttpExportJobManager::new(&config.service)?;
/// let jobs = manager.list(config.job.workspace_id, 0, 10).await?;
/// println!("{} jobs", jobs.jobs.len());
/// # Ok(())
/// # }
/// ```
pub struct HttpExportJobManager {
    /// Base URL without trailing slash
    base_url: String,

    client: Client,

    username: String,

    password: SecretString,
}

impl HttpExportJobManager {
    /// Creates a manager from the service configuration
    ///
    /// # Errors
    ///
    /// Returns `CourierError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for export service");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            CourierError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn jobs_url(&self, workspace_id: WorkspaceId) -> String {
        format!(
            "{}/export/v1/workspaces/{}/jobs",
            self.base_url, workspace_id
        )
    }

    fn job_url(&self, workspace_id: WorkspaceId, job_id: JobId) -> String {
        format!("{}/{}", self.jobs_url(workspace_id), job_id)
    }

    fn auth_header_value(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password.expose_secret());
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {encoded}")
    }

    /// Sends a request and decodes the JSON body
    ///
    /// `subject` names the job or resource in not-found errors.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, subject: &str) -> Result<T> {
        let response = request
            .header("Authorization", self.auth_header_value())
            .header(CSRF_HEADER, "-")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExportServiceError::Timeout(e.to_string())
                } else {
                    ExportServiceError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, subject, body).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExportServiceError::InvalidResponse(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| {
            ExportServiceError::InvalidResponse(format!("Failed to decode response: {e}")).into()
        })
    }

    /// Unwraps the payload of an envelope that must carry one
    fn require_value<T>(response: ValueResponse<T>, what: &str) -> Result<T> {
        match response.value {
            Some(value) => Ok(value),
            None => {
                let outcome = response.into_service_response();
                Err(ExportServiceError::InvalidResponse(format!(
                    "Response without {what}: {}",
                    outcome.error_summary()
                ))
                .into())
            }
        }
    }
}

/// Maps a non-success HTTP status to a service error
fn map_status(status: StatusCode, subject: &str, body: String) -> ExportServiceError {
    match status {
        StatusCode::NOT_FOUND => ExportServiceError::JobNotFound(subject.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ExportServiceError::AuthenticationFailed(format!("{status}: {body}"))
        }
        s if s.is_server_error() => ExportServiceError::ServerError {
            status: s.as_u16(),
            message: body,
        },
        s => ExportServiceError::ClientError {
            status: s.as_u16(),
            message: body,
        },
    }
}

#[async_trait]
impl ExportJobManager for HttpExportJobManager {
    async fn create(
        &self,
        workspace_id: WorkspaceId,
        job_id: JobId,
        settings: &ExportJobSettings,
        application_name: &str,
        correlation_id: &str,
    ) -> Result<ValidationResult> {
        let url = self.job_url(workspace_id, job_id);
        let body = CreateJobRequest {
            settings,
            application_name,
            correlation_id,
        };

        tracing::debug!(url = %url, job_id = %job_id, "Creating export job");

        let response: ValueResponse<CreateJobValue> = self
            .send(self.client.post(&url).json(&body), &job_id.to_string())
            .await?;

        Ok(response.into())
    }

    async fn start(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse> {
        let url = format!("{}/start", self.job_url(workspace_id, job_id));
        tracing::debug!(url = %url, job_id = %job_id, "Starting export job");

        self.send(self.client.post(&url), &job_id.to_string()).await
    }

    async fn get(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<JobStatusSnapshot> {
        let url = self.job_url(workspace_id, job_id);
        tracing::trace!(url = %url, job_id = %job_id, "Fetching export job status");

        let response: ValueResponse<JobStatusSnapshot> =
            self.send(self.client.get(&url), &job_id.to_string()).await?;

        Self::require_value(response, "job status")
    }

    async fn cancel(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse> {
        let url = format!("{}/cancel", self.job_url(workspace_id, job_id));
        tracing::debug!(url = %url, job_id = %job_id, "Cancelling export job");

        self.send(self.client.post(&url), &job_id.to_string()).await
    }

    async fn list(&self, workspace_id: WorkspaceId, offset: usize, limit: usize) -> Result<JobList> {
        let url = Url::parse_with_params(
            &self.jobs_url(workspace_id),
            &[("start", offset.to_string()), ("length", limit.to_string())],
        )
        .map_err(|e| CourierError::Configuration(format!("Invalid service URL: {e}")))?;

        tracing::debug!(url = %url, "Listing export jobs");

        let response: ValueResponse<JobList> = self
            .send(self.client.get(url), &format!("workspace {workspace_id}"))
            .await?;

        Self::require_value(response, "job list")
    }

    async fn delete(&self, workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse> {
        let url = self.job_url(workspace_id, job_id);
        tracing::debug!(url = %url, job_id = %job_id, "Deleting export job output");

        self.send(self.client.delete(&url), &job_id.to_string()).await
    }

    async fn get_settings(
        &self,
        workspace_id: WorkspaceId,
        job_id: JobId,
    ) -> Result<ExportJobSettings> {
        let url = format!("{}/settings", self.job_url(workspace_id, job_id));
        tracing::debug!(url = %url, job_id = %job_id, "Fetching export job settings");

        let response: ValueResponse<ExportJobSettings> =
            self.send(self.client.get(&url), &job_id.to_string()).await?;

        Self::require_value(response, "job settings")
    }
}
