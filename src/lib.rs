// Courier - Export job client
// Copyright (c) 2025 Courier Contributors
// Licensed under the MIT License

//! # Courier - Export Job Client
//!
//! Courier drives a remote document-export service: it creates, starts,
//! polls, cancels, lists and deletes export jobs and reports their results
//! on the terminal. The export itself runs inside the service.
//!
//! ## Overview
//!
//! This library provides:
//! - **Settings** as one serde value type, loadable from TOML and sent as JSON
//! - **Remote calls** through the [`adapters::export_service::ExportJobManager`] trait
//! - **Polling** a job to a terminal status with retries and a progress line
//! - **Bulk runs** starting many jobs concurrently and aggregating the outcomes
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Job workflows, polling, bulk runs and status reporting
//! - [`adapters`] - HTTP client of the export service
//! - [`domain`] - Identifiers, job snapshots, export settings and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier::adapters::export_service::HttpExportJobManager;
//! use courier::config::load_config;
//! use courier::core::export::ExportJobService;
//! use courier::core::reporting::ConsoleReporter;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("courier.toml")?;
//!     let manager = Arc::new(HttpExportJobManager::new(&config.service)?);
//!     let service =
//!         ExportJobService::from_config(&config, manager, Arc::new(ConsoleReporter::new()));
//!
//!     let outcome = service
//!         .run_job(&config.job.settings, &config.job.correlation_id)
//!         .await?;
//!
//!     println!("Finished as {}", outcome.snapshot.job_status);
//!     Ok(())
//! }
//! ```
//!
//! ## Bulk Runs
//!
//! ```rust,no_run
//! use courier::core::export::ExportJobService;
//!
//! # async fn example(service: ExportJobService) -> courier::domain::Result<()> {
//! let handles = service.runnable_jobs(1000).await?;
//! let summary = service.start_all(handles).await;
//!
//! println!("{}", summary.final_message());
//! for (label, count) in summary.breakdown.entries() {
//!     println!("{label}: {count}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All library functions return [`domain::Result`] with [`domain::CourierError`]:
//!
//! ```rust,no_run
//! use courier::domain::CourierError;
//!
//! fn example() -> Result<(), CourierError> {
//!     let config = courier::config::load_config("courier.toml")?;
//!     println!("Workspace {}", config.job.workspace_id);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
