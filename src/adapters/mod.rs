//! External system integrations for Courier.
//!
//! - [`export_service`] - remote export job manager (trait + REST client)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the polling and
//! bulk-run logic can be tested against in-memory implementations.
//!
//! ```rust,no_run
//! use courier::adapters::export_service::{ExportJobManager, HttpExportJobManager};
//! use courier::config::{secret_string, ServiceConfig};
//! use std::sync::Arc;
//!
//! # fn example() -> courier::domain::Result<()> {
//! let config = ServiceConfig {
//!     base_url: "https://relativity.example.com/Relativity.REST/api".to_string(),
//!     username: "user".to_string(),
//!     password: secret_string("pass".to_string()),
//!     timeout_seconds: 60,
//!     tls_verify: true,
//! };
//!
//! let manager: Arc<dyn ExportJobManager> = Arc::new(HttpExportJobManager::new(&config)?);
//! # Ok(())
//! # }
//! ```

pub mod export_service;
