//! Scripted in-memory export job manager shared by integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use courier::adapters::export_service::{ExportJobManager, JobList, ServiceResponse, ValidationResult};
use courier::domain::{
    CourierError, ExportJobSettings, ExportServiceError, ExportStatus, JobId, JobStatusSnapshot,
    Result, WorkspaceId,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn workspace() -> WorkspaceId {
    WorkspaceId::new(1020245).unwrap()
}

/// One scripted reply to a status fetch
#[derive(Debug, Clone)]
pub enum Fetch {
    Status(ExportStatus),
    Snapshot(JobStatusSnapshot),
    Fail(&'static str),
    Panic,
}

/// Reply to a start call
#[derive(Debug, Clone)]
pub enum Start {
    Accept,
    Refuse(&'static str, &'static str),
    Fail(&'static str),
}

/// Record of a create call
#[derive(Debug, Clone)]
pub struct CreatedJob {
    pub job_id: JobId,
    pub application_name: String,
    pub correlation_id: String,
}

/// Export job manager replaying per-job scripts
#[derive(Default)]
pub struct ScriptedJobManager {
    fetches: Mutex<HashMap<JobId, VecDeque<Fetch>>>,
    default_fetches: Mutex<Vec<Fetch>>,
    starts: Mutex<HashMap<JobId, Start>>,
    validation: Mutex<Option<ValidationResult>>,
    rejected_correlations: Mutex<HashMap<String, ValidationResult>>,
    created: Mutex<Vec<CreatedJob>>,
    listed: Mutex<Vec<JobStatusSnapshot>>,
    refusal: Mutex<Option<ServiceResponse>>,
    settings: Mutex<HashMap<JobId, ExportJobSettings>>,
    started: Mutex<Vec<JobId>>,
    cancelled: Mutex<Vec<JobId>>,
    deleted: Mutex<Vec<JobId>>,
    get_calls: AtomicUsize,
}

impl ScriptedJobManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the replies to status fetches of `job_id`
    pub fn script(self, job_id: JobId, fetches: Vec<Fetch>) -> Self {
        self.fetches
            .lock()
            .unwrap()
            .insert(job_id, VecDeque::from(fetches));
        self
    }

    /// Script used for jobs without their own, e.g. jobs created during a test
    pub fn script_any(self, fetches: Vec<Fetch>) -> Self {
        *self.default_fetches.lock().unwrap() = fetches;
        self
    }

    /// Scripts the reply to starting `job_id`; unscripted starts are accepted
    pub fn on_start(self, job_id: JobId, start: Start) -> Self {
        self.starts.lock().unwrap().insert(job_id, start);
        self
    }

    /// Makes every create call return `validation`
    pub fn reject_create(self, validation: ValidationResult) -> Self {
        *self.validation.lock().unwrap() = Some(validation);
        self
    }

    /// Makes only the create call carrying `correlation_id` return `validation`
    pub fn reject_correlation(self, correlation_id: &str, validation: ValidationResult) -> Self {
        self.rejected_correlations
            .lock()
            .unwrap()
            .insert(correlation_id.to_string(), validation);
        self
    }

    /// Makes cancel and delete calls return `response`
    pub fn refuse_with(self, response: ServiceResponse) -> Self {
        *self.refusal.lock().unwrap() = Some(response);
        self
    }

    /// Jobs returned by `list`
    pub fn with_jobs(self, jobs: Vec<JobStatusSnapshot>) -> Self {
        *self.listed.lock().unwrap() = jobs;
        self
    }

    pub fn with_settings(self, job_id: JobId, settings: ExportJobSettings) -> Self {
        self.settings.lock().unwrap().insert(job_id, settings);
        self
    }

    pub fn created(&self) -> Vec<CreatedJob> {
        self.created.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<JobId> {
        self.started.lock().unwrap().clone()
    }

    pub fn cancelled(&self) -> Vec<JobId> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<JobId> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn acknowledge(&self, job_id: JobId) -> ServiceResponse {
        self.refusal
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ServiceResponse::success(job_id))
    }
}

#[async_trait]
impl ExportJobManager for ScriptedJobManager {
    async fn create(
        &self,
        _workspace_id: WorkspaceId,
        job_id: JobId,
        _settings: &ExportJobSettings,
        application_name: &str,
        correlation_id: &str,
    ) -> Result<ValidationResult> {
        if let Some(validation) = self.validation.lock().unwrap().clone() {
            return Ok(validation);
        }
        if let Some(validation) = self.rejected_correlations.lock().unwrap().get(correlation_id) {
            return Ok(validation.clone());
        }
        self.created.lock().unwrap().push(CreatedJob {
            job_id,
            application_name: application_name.to_string(),
            correlation_id: correlation_id.to_string(),
        });
        Ok(ValidationResult::success())
    }

    async fn start(&self, _workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse> {
        let start = self
            .starts
            .lock()
            .unwrap()
            .get(&job_id)
            .cloned()
            .unwrap_or(Start::Accept);
        match start {
            Start::Accept => {
                self.started.lock().unwrap().push(job_id);
                Ok(ServiceResponse::success(job_id))
            }
            Start::Refuse(code, message) => Ok(ServiceResponse::failure(code, message)),
            Start::Fail(message) => Err(CourierError::from(ExportServiceError::ConnectionFailed(
                message.to_string(),
            ))),
        }
    }

    async fn get(&self, _workspace_id: WorkspaceId, job_id: JobId) -> Result<JobStatusSnapshot> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        // pop before acting so a panic never poisons the lock
        let next = {
            let default_fetches = self.default_fetches.lock().unwrap().clone();
            let mut fetches = self.fetches.lock().unwrap();
            let script = fetches.entry(job_id).or_insert_with(|| {
                default_fetches
                    .into_iter()
                    .map(|fetch| match fetch {
                        Fetch::Snapshot(snapshot) => {
                            Fetch::Snapshot(JobStatusSnapshot { id: job_id, ..snapshot })
                        }
                        other => other,
                    })
                    .collect()
            });
            script.pop_front()
        };

        match next {
            Some(Fetch::Status(status)) => Ok(JobStatusSnapshot::new(job_id, status)),
            Some(Fetch::Snapshot(snapshot)) => Ok(snapshot),
            Some(Fetch::Fail(message)) => Err(CourierError::from(
                ExportServiceError::ConnectionFailed(message.to_string()),
            )),
            Some(Fetch::Panic) => panic!("scripted panic while fetching {job_id}"),
            None => Err(CourierError::from(ExportServiceError::JobNotFound(
                job_id.to_string(),
            ))),
        }
    }

    async fn cancel(&self, _workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse> {
        let response = self.acknowledge(job_id);
        if !response.is_refused() {
            self.cancelled.lock().unwrap().push(job_id);
        }
        Ok(response)
    }

    async fn list(&self, _workspace_id: WorkspaceId, offset: usize, limit: usize) -> Result<JobList> {
        let jobs = self
            .listed
            .lock()
            .unwrap()
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(JobList { jobs })
    }

    async fn delete(&self, _workspace_id: WorkspaceId, job_id: JobId) -> Result<ServiceResponse> {
        let response = self.acknowledge(job_id);
        if !response.is_refused() {
            self.deleted.lock().unwrap().push(job_id);
        }
        Ok(response)
    }

    async fn get_settings(
        &self,
        _workspace_id: WorkspaceId,
        job_id: JobId,
    ) -> Result<ExportJobSettings> {
        self.settings
            .lock()
            .unwrap()
            .get(&job_id)
            .cloned()
            .ok_or_else(|| ExportServiceError::JobNotFound(job_id.to_string()).into())
    }
}
