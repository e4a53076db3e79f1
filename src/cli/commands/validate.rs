//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Courier configuration file.

use super::LoadedConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, loaded: LoadedConfig) -> anyhow::Result<i32> {
        tracing::info!(config_path = %loaded.path, "Validating configuration");

        println!("🔍 Validating configuration file: {}", loaded.path);
        println!();

        // Loading validates as well
        let config = match loaded.config {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let source = &config.job.settings.source;
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Service URL: {}", config.service.base_url);
        println!("  Username: {}", config.service.username);
        println!("  TLS Verify: {}", config.service.tls_verify);
        println!("  Workspace: {}", config.job.workspace_id);
        println!("  Application Name: {}", config.job.application_name);
        println!("  Export Source: {}", source.export_source_type);
        println!(
            "  Source Artifact ID: {}",
            source
                .export_source_artifact_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
        println!(
            "  Poll Interval: {} ms (retry delay {} ms, {} retries)",
            config.polling.interval_ms, config.polling.retry_delay_ms, config.polling.max_retries
        );
        println!("  List Limit: {}", config.bulk.list_limit);
        println!();
        Ok(0)
    }
}
