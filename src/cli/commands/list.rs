//! List command implementation

use super::{report_failure, CommandContext, LoadedConfig};
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Index of the first job to list
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Maximum number of jobs to list (defaults to bulk.list_limit)
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, loaded: LoadedConfig) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(loaded) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let limit = self.limit.unwrap_or(ctx.config.bulk.list_limit);
        let jobs = match ctx.service.list_jobs(self.offset, limit).await {
            Ok(jobs) => jobs,
            Err(e) => return Ok(report_failure("Failed to list export jobs", &e)),
        };

        println!(
            "📋 Export jobs in workspace {} ({} shown):",
            ctx.service.workspace_id(),
            jobs.len()
        );
        for job in &jobs {
            println!(
                "  {}  {:<20} {}  {}",
                job.id,
                job.job_status.to_string(),
                job.created_on
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                job.correlation_id.as_deref().unwrap_or("-")
            );
        }

        Ok(0)
    }
}
