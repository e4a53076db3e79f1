//! Integration tests for concurrent bulk runs

mod common;

use common::{workspace, Fetch, ScriptedJobManager, Start};
use courier::core::polling::PollConfig;
use courier::core::reporting::RecordingReporter;
use courier::core::runner::{ConcurrentJobRunner, StatusBreakdown};
use courier::domain::{ExportStatus, JobHandle, JobId, JobStatusSnapshot};
use std::sync::Arc;

fn runner(manager: Arc<ScriptedJobManager>, reporter: Arc<RecordingReporter>) -> ConcurrentJobRunner {
    ConcurrentJobRunner::new(manager, PollConfig::default().without_progress(), reporter)
}

fn handles(ids: &[JobId]) -> Vec<JobHandle> {
    ids.iter().map(|id| JobHandle::new(workspace(), *id)).collect()
}

fn result_for(
    summary: &courier::core::runner::BulkRunSummary,
    job_id: JobId,
) -> courier::core::runner::RunnableJobResult {
    summary
        .results
        .iter()
        .find(|r| r.job_id == job_id)
        .cloned()
        .unwrap_or_else(|| panic!("no result for {job_id}"))
}

#[tokio::test(start_paused = true)]
async fn test_all_jobs_complete() {
    let ids: Vec<JobId> = (0..3).map(|_| JobId::generate()).collect();
    let mut manager = ScriptedJobManager::new();
    for id in &ids {
        manager = manager.script(
            *id,
            vec![
                Fetch::Status(ExportStatus::Running),
                Fetch::Status(ExportStatus::Transferring),
                Fetch::Status(ExportStatus::Completed),
            ],
        );
    }
    let manager = Arc::new(manager);
    let reporter = Arc::new(RecordingReporter::new());

    let summary = runner(manager.clone(), reporter).run_all(handles(&ids)).await;

    assert_eq!(summary.results.len(), 3);
    assert!(summary.is_successful());
    assert_eq!(summary.breakdown.completed, 3);
    assert_eq!(manager.started().len(), 3);
    assert_eq!(manager.get_calls(), 9);
    for id in &ids {
        let result = result_for(&summary, *id);
        assert_eq!(result.status, Some(ExportStatus::Completed));
        assert!(result.message.starts_with(&format!("Export job ID: {id}")));
    }
}

#[tokio::test(start_paused = true)]
async fn test_refused_start_is_not_polled() {
    let running = JobId::generate();
    let refused = JobId::generate();
    let manager = Arc::new(
        ScriptedJobManager::new()
            .script(running, vec![Fetch::Status(ExportStatus::Completed)])
            .on_start(refused, Start::Refuse("EXP-409", "Job is already running")),
    );
    let reporter = Arc::new(RecordingReporter::new());

    let summary = runner(manager.clone(), reporter)
        .run_all(handles(&[running, refused]))
        .await;

    assert_eq!(summary.results.len(), 2);
    let result = result_for(&summary, refused);
    assert_eq!(result.status, None);
    assert_eq!(result.message, "<EXP-409> Job is already running");
    assert_eq!(result_for(&summary, running).status, Some(ExportStatus::Completed));
    // only the started job was fetched
    assert_eq!(manager.get_calls(), 1);
    assert_eq!(summary.breakdown.not_run, 1);
}

#[tokio::test(start_paused = true)]
async fn test_start_transport_error_is_recorded() {
    let job_id = JobId::generate();
    let manager = Arc::new(ScriptedJobManager::new().on_start(job_id, Start::Fail("connection reset")));

    let summary = runner(manager, Arc::new(RecordingReporter::new()))
        .run_all(handles(&[job_id]))
        .await;

    let result = result_for(&summary, job_id);
    assert_eq!(result.status, None);
    assert!(result.message.contains("connection reset"));
}

#[tokio::test(start_paused = true)]
async fn test_failures_do_not_cancel_siblings() {
    let completed = JobId::generate();
    let with_errors = JobId::generate();
    let failed = JobId::generate();
    let unreachable = JobId::generate();
    let panicking = JobId::generate();

    let manager = Arc::new(
        ScriptedJobManager::new()
            .script(
                completed,
                vec![
                    Fetch::Status(ExportStatus::Scheduled),
                    Fetch::Fail("blip"),
                    Fetch::Status(ExportStatus::Completed),
                ],
            )
            .script(
                with_errors,
                vec![Fetch::Status(ExportStatus::CompletedWithErrors)],
            )
            .script(
                failed,
                vec![Fetch::Snapshot(
                    JobStatusSnapshot::new(failed, ExportStatus::Failed)
                        .with_error("EXP-500", "Destination unreachable"),
                )],
            )
            .script(
                unreachable,
                vec![
                    Fetch::Fail("down"),
                    Fetch::Fail("down"),
                    Fetch::Fail("down"),
                    Fetch::Fail("still down"),
                ],
            )
            .script(panicking, vec![Fetch::Status(ExportStatus::Running), Fetch::Panic]),
    );
    let reporter = Arc::new(RecordingReporter::new());

    let summary = runner(manager, reporter.clone())
        .run_all(handles(&[completed, with_errors, failed, unreachable, panicking]))
        .await;

    assert_eq!(summary.results.len(), 5);
    assert_eq!(
        summary.breakdown,
        StatusBreakdown {
            completed: 1,
            completed_with_errors: 1,
            failed: 1,
            cancelled: 0,
            not_run: 2,
        }
    );

    let failed_result = result_for(&summary, failed);
    assert!(failed_result
        .message
        .ends_with("Error: EXP-500 - Destination unreachable"));
    assert!(reporter
        .errors()
        .contains(&"EXP-500 - Destination unreachable".to_string()));

    let unreachable_result = result_for(&summary, unreachable);
    assert_eq!(unreachable_result.status, None);
    assert!(unreachable_result.message.contains("still down"));

    let panicked = result_for(&summary, panicking);
    assert_eq!(panicked.status, None);
    assert!(panicked.message.starts_with("Job task failed"));

    assert!(!summary.is_successful());
    assert_eq!(summary.final_message().matches("\n\n").count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_empty_run() {
    let manager = Arc::new(ScriptedJobManager::new());
    let summary = runner(manager, Arc::new(RecordingReporter::new()))
        .run_all(Vec::new())
        .await;

    assert!(summary.results.is_empty());
    assert_eq!(summary.breakdown.total(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_progress_enabled_bulk_run_finishes() {
    let ids: Vec<JobId> = (0..2).map(|_| JobId::generate()).collect();
    let mut manager = ScriptedJobManager::new();
    for id in &ids {
        manager = manager.script(
            *id,
            vec![
                Fetch::Status(ExportStatus::Running),
                Fetch::Status(ExportStatus::Cancelled),
            ],
        );
    }
    let reporter = Arc::new(RecordingReporter::new());
    let summary = ConcurrentJobRunner::new(Arc::new(manager), PollConfig::default(), reporter.clone())
        .run_all(handles(&ids))
        .await;

    assert_eq!(summary.breakdown.cancelled, 2);
    assert!(reporter.status_updates() > 0);

    let count = reporter.status_updates();
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    assert_eq!(reporter.status_updates(), count);
}
