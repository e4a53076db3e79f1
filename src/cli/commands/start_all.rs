//! Start-all command implementation
//!
//! Starts every job of the workspace that is still in `New` status and polls
//! them concurrently, optionally creating fresh jobs first.

use super::{report_failure, CommandContext, LoadedConfig};
use crate::core::reporting::StatusReporter;
use clap::Args;

/// Arguments for the start-all command
#[derive(Args, Debug, Default)]
pub struct StartAllArgs {
    /// Create this many jobs before starting (overrides bulk.create_jobs)
    #[arg(long)]
    pub create: Option<usize>,

    /// Maximum number of jobs listed when looking for runnable ones
    #[arg(long)]
    pub limit: Option<usize>,
}

impl StartAllArgs {
    /// Execute the start-all command
    pub async fn execute(&self, loaded: LoadedConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting start-all command");

        let ctx = match CommandContext::load(loaded) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let create = self.create.unwrap_or(ctx.config.bulk.create_jobs);
        if create > 0 {
            println!("🆕 Creating {create} export jobs...");
            let created = ctx
                .service
                .create_jobs_concurrently(
                    &ctx.config.job.settings,
                    &ctx.config.job.correlation_id,
                    create,
                )
                .await;
            let rejected = created.iter().filter(|result| result.is_err()).count();
            println!("✅ Created {} export jobs", created.len() - rejected);
            if rejected > 0 {
                for e in created.iter().filter_map(|result| result.as_ref().err()) {
                    tracing::warn!(error = %e, "Export job was not created");
                }
                println!("⚠️  {rejected} export jobs could not be created");
            }
        }

        let limit = self.limit.unwrap_or(ctx.config.bulk.list_limit);
        let handles = match ctx.service.runnable_jobs(limit).await {
            Ok(handles) => handles,
            Err(e) => return Ok(report_failure("Failed to list export jobs", &e)),
        };

        if handles.is_empty() {
            println!("ℹ️  No export jobs in New status in workspace {}", ctx.service.workspace_id());
            return Ok(0);
        }

        println!("🚀 Starting {} export jobs...", handles.len());
        println!();

        let summary = ctx.service.start_all(handles).await;
        ctx.reporter
            .report_outcome(&summary.final_message(), &summary.breakdown);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        let exit_code = if summary.is_successful() {
            println!("✅ All export jobs completed successfully!");
            0
        } else {
            println!("⚠️  Some export jobs did not complete successfully");
            1
        };

        Ok(exit_code)
    }
}
