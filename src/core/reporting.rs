//! Status reporting
//!
//! `StatusReporter` is the context object polling and bulk runs write their
//! user-facing progress to. The CLI creates one [`ConsoleReporter`] per
//! invocation; tests use [`RecordingReporter`].

use crate::core::runner::StatusBreakdown;
use std::io::Write;
use std::sync::Mutex;

/// Sink for user-facing progress and outcomes
pub trait StatusReporter: Send + Sync {
    /// Replaces the transient status line
    fn update_status(&self, message: &str);

    /// Removes the transient status line
    fn clear_status(&self);

    /// Prints a progress message that stays on screen
    fn report_info(&self, message: &str);

    fn report_warning(&self, message: &str);

    fn report_error(&self, message: &str);

    /// Prints the final result of a run
    fn report_outcome(&self, summary: &str, breakdown: &StatusBreakdown);
}

/// Reporter writing to the terminal
///
/// The status line is redrawn in place on stderr. Warnings, errors and
/// outcomes clear it first so they never interleave with it.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    status_visible: Mutex<bool>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn take_status_line(&self) {
        let mut visible = self
            .status_visible
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if *visible {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
            *visible = false;
        }
    }
}

impl StatusReporter for ConsoleReporter {
    fn update_status(&self, message: &str) {
        let mut visible = self
            .status_visible
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r\x1b[2K⏳ {message}");
        let _ = stderr.flush();
        *visible = true;
    }

    fn clear_status(&self) {
        self.take_status_line();
    }

    fn report_info(&self, message: &str) {
        self.take_status_line();
        eprintln!("{message}");
    }

    fn report_warning(&self, message: &str) {
        self.take_status_line();
        eprintln!("⚠️  {message}");
    }

    fn report_error(&self, message: &str) {
        self.take_status_line();
        eprintln!("❌ {message}");
    }

    fn report_outcome(&self, summary: &str, breakdown: &StatusBreakdown) {
        self.take_status_line();
        println!("{summary}");
        println!();
        println!("📊 Job status breakdown:");
        for (label, count) in breakdown.entries() {
            println!("  {label}: {count}");
        }
    }
}

/// One call recorded by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Status(String),
    Cleared,
    Info(String),
    Warning(String),
    Error(String),
    Outcome(String),
}

/// Reporter that keeps every call in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ReportEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    /// All events so far, oldest first
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `update_status` calls so far
    pub fn status_updates(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ReportEvent::Status(_)))
            .count()
    }

    pub fn infos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Info(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Warning(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }
}

impl StatusReporter for RecordingReporter {
    fn update_status(&self, message: &str) {
        self.push(ReportEvent::Status(message.to_string()));
    }

    fn clear_status(&self) {
        self.push(ReportEvent::Cleared);
    }

    fn report_info(&self, message: &str) {
        self.push(ReportEvent::Info(message.to_string()));
    }

    fn report_warning(&self, message: &str) {
        self.push(ReportEvent::Warning(message.to_string()));
    }

    fn report_error(&self, message: &str) {
        self.push(ReportEvent::Error(message.to_string()));
    }

    fn report_outcome(&self, summary: &str, _breakdown: &StatusBreakdown) {
        self.push(ReportEvent::Outcome(summary.to_string()));
    }
}
