//! Concurrent start-and-poll over many jobs

use super::summary::{BulkRunSummary, RunnableJobResult};
use crate::adapters::export_service::ExportJobManager;
use crate::core::polling::{PollConfig, PollingCoordinator};
use crate::core::reporting::StatusReporter;
use crate::domain::ids::JobId;
use crate::domain::JobHandle;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Starts a set of jobs concurrently and polls each to completion
///
/// Every job runs in its own task. A job that is refused, fails to poll or
/// panics only affects its own entry in the summary.
pub struct ConcurrentJobRunner {
    manager: Arc<dyn ExportJobManager>,
    poll_config: PollConfig,
    reporter: Arc<dyn StatusReporter>,
}

impl ConcurrentJobRunner {
    pub fn new(
        manager: Arc<dyn ExportJobManager>,
        poll_config: PollConfig,
        reporter: Arc<dyn StatusReporter>,
    ) -> Self {
        Self {
            manager,
            poll_config,
            reporter,
        }
    }

    /// Runs every handle and returns one result per handle
    pub async fn run_all(&self, handles: Vec<JobHandle>) -> BulkRunSummary {
        let started = Instant::now();
        let total = handles.len();
        let results = Arc::new(Mutex::new(Vec::with_capacity(total)));

        tracing::info!(jobs = total, "Starting bulk run");

        let (job_ids, tasks): (Vec<JobId>, Vec<_>) = handles
            .into_iter()
            .map(|handle| {
                let manager = Arc::clone(&self.manager);
                let reporter = Arc::clone(&self.reporter);
                let poll_config = self.poll_config.clone();
                let results = Arc::clone(&results);
                let job_id = handle.job_id;

                let task = tokio::spawn(async move {
                    let result = run_job(manager, poll_config, reporter, handle).await;
                    results.lock().await.push(result);
                });
                (job_id, task)
            })
            .unzip();

        for (job_id, joined) in job_ids.into_iter().zip(join_all(tasks).await) {
            if let Err(e) = joined {
                tracing::error!(job_id = %job_id, error = %e, "Job task did not complete");
                results
                    .lock()
                    .await
                    .push(RunnableJobResult::not_run(job_id, format!("Job task failed: {e}")));
            }
        }

        let results = std::mem::take(&mut *results.lock().await);
        let summary = BulkRunSummary::new(results, started.elapsed());
        summary.log_summary();
        summary
    }
}

async fn run_job(
    manager: Arc<dyn ExportJobManager>,
    poll_config: PollConfig,
    reporter: Arc<dyn StatusReporter>,
    handle: JobHandle,
) -> RunnableJobResult {
    let JobHandle {
        workspace_id,
        job_id,
        ..
    } = handle;

    match manager.start(workspace_id, job_id).await {
        Ok(response) if response.has_error() => {
            tracing::warn!(
                job_id = %job_id,
                error_code = response.error_code.as_deref().unwrap_or_default(),
                "Export job was not started"
            );
            return RunnableJobResult::not_run(job_id, response.error_summary());
        }
        Ok(_) => tracing::info!(job_id = %job_id, "Export job started"),
        Err(e) => {
            tracing::error!(job_id = %job_id, error = %e, "Failed to start export job");
            return RunnableJobResult::not_run(job_id, format!("Failed to start job {job_id}: {e}"));
        }
    }

    let coordinator = PollingCoordinator::new(poll_config, reporter);
    let manager = manager.as_ref();
    match coordinator
        .wait_for_completion(job_id, || manager.get(workspace_id, job_id))
        .await
    {
        Ok(outcome) => RunnableJobResult::finished(&outcome.snapshot),
        Err(e) => RunnableJobResult::not_run(job_id, format!("Polling job {job_id} failed: {e}")),
    }
}
