//! Export job workflows
//!
//! [`ExportJobService`] ties the remote job manager, polling and bulk runs
//! together for one workspace.

pub mod service;

pub use service::ExportJobService;
