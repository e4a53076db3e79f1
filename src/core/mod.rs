//! Core logic for Courier.
//!
//! # Modules
//!
//! - [`export`] - Job lifecycle workflows on top of the remote job manager
//! - [`polling`] - Poll-until-terminal loop with retries and progress
//! - [`reporting`] - User-facing status reporting
//! - [`runner`] - Concurrent bulk start-and-poll with aggregation
//!
//! # Example
//!
//! ```rust,no_run
//! use courier::adapters::export_service::HttpExportJobManager;
//! use courier::config::load_config;
//! use courier::core::export::ExportJobService;
//! use courier::core::reporting::ConsoleReporter;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("courier.toml")?;
//! let manager = Arc::new(HttpExportJobManager::new(&config.service)?);
//! let service = ExportJobService::from_config(&config, manager, Arc::new(ConsoleReporter::new()));
//!
//! let outcome = service
//!     .run_job(&config.job.settings, &config.job.correlation_id)
//!     .await?;
//!
//! println!("Job status: {}", outcome.snapshot.job_status);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod polling;
pub mod reporting;
pub mod runner;
