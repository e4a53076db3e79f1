//! Bulk job runs
//!
//! [`ConcurrentJobRunner`] fans out start-and-poll workflows and collects
//! their outcomes into a [`BulkRunSummary`].

pub mod bulk;
pub mod summary;

pub use bulk::ConcurrentJobRunner;
pub use summary::{format_job_summary, BulkRunSummary, RunnableJobResult, StatusBreakdown};
