//! Polling a remote job to completion
//!
//! - [`coordinator`] - the poll loop with retry budget and fixed retry delay
//! - [`progress`] - the elapsed-time progress side-task

pub mod coordinator;
pub mod progress;

pub use coordinator::{PollConfig, PollOutcome, PollingCoordinator};
pub use progress::ProgressReporter;
