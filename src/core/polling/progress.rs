//! Elapsed-time progress side-task
//!
//! While a job is polled, a background task redraws
//! `"Fetching updates (<ms> ms)"` on every tick, measuring from the start of
//! the current fetch attempt.

use crate::core::reporting::StatusReporter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const MIN_TICK: Duration = Duration::from_millis(1);

/// Handle on a running progress task
///
/// Call [`ProgressReporter::stop`] to end it; dropping the handle aborts the
/// task.
pub struct ProgressReporter {
    attempt_started: watch::Sender<Instant>,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Spawns the task on the current runtime
    ///
    /// A zero `tick` is raised to one millisecond.
    pub fn spawn(reporter: Arc<dyn StatusReporter>, tick: Duration) -> Self {
        let tick = tick.max(MIN_TICK);
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let (attempt_started, started_rx) = watch::channel(Instant::now());

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;

                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        let elapsed = started_rx.borrow().elapsed();
                        reporter.update_status(&format!(
                            "Fetching updates ({} ms)",
                            elapsed.as_millis()
                        ));
                    }
                }
            }

            reporter.clear_status();
        });

        Self {
            attempt_started,
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Restarts the stopwatch at the beginning of a fetch attempt
    pub fn restart_stopwatch(&self) {
        self.attempt_started.send_replace(Instant::now());
    }

    /// Signals the task to stop and waits until it has exited
    pub async fn stop(mut self) {
        self.stop_tx.send_replace(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    tracing::warn!(error = %e, "Progress reporter task panicked");
                }
            }
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reporting::{RecordingReporter, ReportEvent};

    #[tokio::test(start_paused = true)]
    async fn test_reports_elapsed_time_per_attempt() {
        let reporter = Arc::new(RecordingReporter::new());
        let progress = ProgressReporter::spawn(reporter.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(250)).await;
        progress.restart_stopwatch();
        tokio::time::sleep(Duration::from_millis(80)).await;
        progress.stop().await;

        let statuses: Vec<String> = reporter
            .events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Status(m) => Some(m),
                _ => None,
            })
            .collect();

        assert_eq!(statuses.first().map(String::as_str), Some("Fetching updates (0 ms)"));
        assert!(statuses.contains(&"Fetching updates (200 ms)".to_string()));
        // tick at 300 ms, 50 ms after the restart
        assert_eq!(statuses.last().map(String::as_str), Some("Fetching updates (50 ms)"));
        assert_eq!(reporter.events().last(), Some(&ReportEvent::Cleared));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_updates_after_stop() {
        let reporter = Arc::new(RecordingReporter::new());
        let progress = ProgressReporter::spawn(reporter.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;
        progress.stop().await;
        let count = reporter.status_updates();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(reporter.status_updates(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_tick_is_clamped() {
        let reporter = Arc::new(RecordingReporter::new());
        let progress = ProgressReporter::spawn(reporter.clone(), Duration::ZERO);

        tokio::time::sleep(Duration::from_millis(5)).await;
        progress.stop().await;

        assert!(reporter.status_updates() > 0);
        assert_eq!(reporter.events().last(), Some(&ReportEvent::Cleared));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let reporter = Arc::new(RecordingReporter::new());
        let progress = ProgressReporter::spawn(reporter.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(progress);
        tokio::task::yield_now().await;
        let count = reporter.status_updates();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(reporter.status_updates(), count);
    }
}
