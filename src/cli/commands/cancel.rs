//! Cancel command implementation
//!
//! Cancels the given job, or creates and starts a fresh job and cancels it
//! right away when no job ID is passed.

use super::{report_failure, CommandContext, LoadedConfig};
use crate::domain::JobId;
use clap::Args;

/// Arguments for the cancel command
#[derive(Args, Debug, Default)]
pub struct CancelArgs {
    /// Job to cancel; a new job is created and started when omitted
    #[arg(long)]
    pub job_id: Option<JobId>,
}

impl CancelArgs {
    /// Execute the cancel command
    pub async fn execute(&self, loaded: LoadedConfig) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(loaded) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let job_id = match self.job_id {
            Some(job_id) => job_id,
            None => {
                let handle = match ctx
                    .service
                    .create_job(&ctx.config.job.settings, &ctx.config.job.correlation_id)
                    .await
                {
                    Ok(handle) => handle,
                    Err(e) => return Ok(report_failure("Failed to create export job", &e)),
                };
                if let Err(e) = ctx.service.start_job(handle.job_id).await {
                    return Ok(report_failure("Failed to start export job", &e));
                }
                println!("🚀 Export job started: {}", handle.job_id);
                handle.job_id
            }
        };

        match ctx.service.cancel_job(job_id).await {
            Ok(snapshot) => {
                println!("🛑 Cancellation requested for export job {job_id}");
                println!("  Job status: {}", snapshot.job_status);
                Ok(0)
            }
            Err(e) => Ok(report_failure("Failed to cancel export job", &e)),
        }
    }
}
