//! Export service adapter
//!
//! The job manager trait, its REST implementation and the wire models.

pub mod client;
pub mod models;
pub mod traits;

pub use client::HttpExportJobManager;
pub use models::{JobList, ServiceResponse, ValidationResult};
pub use traits::ExportJobManager;
