//! Run command implementation
//!
//! Creates one export job from the configured settings, starts it and polls
//! it to completion.

use super::{report_failure, CommandContext, LoadedConfig};
use crate::core::runner::format_job_summary;
use crate::domain::settings::SourceType;
use crate::domain::{ExportJobSettings, ExportStatus};
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Override the export source (folder, saved-search, production, rdo)
    #[arg(long)]
    pub source: Option<SourceType>,

    /// Source artifact ID (artifact type ID for rdo)
    #[arg(long)]
    pub source_id: Option<i64>,

    /// View ID
    #[arg(long)]
    pub view_id: Option<i64>,

    /// Override the correlation ID
    #[arg(long)]
    pub correlation_id: Option<String>,
}

impl RunArgs {
    /// Settings from configuration with the CLI source override applied
    pub fn settings(&self, base: &ExportJobSettings) -> ExportJobSettings {
        match self.source {
            Some(kind) => {
                tracing::info!(source = ?kind, "Overriding export source from CLI");
                base.clone().with_source(kind, self.source_id, self.view_id)
            }
            None => base.clone(),
        }
    }

    /// Execute the run command
    pub async fn execute(&self, loaded: LoadedConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let ctx = match CommandContext::load(loaded) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let settings = self.settings(&ctx.config.job.settings);
        let correlation_id = self
            .correlation_id
            .clone()
            .unwrap_or_else(|| ctx.config.job.correlation_id.clone());

        let handle = match ctx.service.create_job(&settings, &correlation_id).await {
            Ok(handle) => handle,
            Err(e) => return Ok(report_failure("Failed to create export job", &e)),
        };
        println!("🆕 Export job created: {}", handle.job_id);

        let outcome = match ctx.service.start_and_wait(handle.job_id).await {
            Ok(outcome) => outcome,
            Err(e) => return Ok(report_failure("Export job did not finish", &e)),
        };

        let snapshot = &outcome.snapshot;
        let records = snapshot.record_breakdown();

        println!();
        println!("{}", format_job_summary(snapshot));
        println!();
        println!("📊 Record breakdown:");
        println!("  Without issues: {}", records.clean);
        println!("  With errors: {}", records.with_errors);
        println!("  With warnings: {}", records.with_warnings);
        println!();
        println!(
            "  Fetches: {} ({} retried), {:.1}s",
            outcome.attempts,
            outcome.retries,
            outcome.elapsed.as_secs_f64()
        );
        println!();

        let exit_code = match snapshot.job_status {
            ExportStatus::Completed => {
                println!("✅ Export completed successfully!");
                0
            }
            ExportStatus::CompletedWithErrors => {
                println!("⚠️  Export completed with errors");
                1
            }
            status => {
                println!("❌ Export finished as {status}");
                1
            }
        };

        Ok(exit_code)
    }
}
