//! Delete command implementation
//!
//! Deletes the output files of a finished job and shows the job before and
//! after the deletion.

use super::{report_failure, CommandContext, LoadedConfig};
use crate::domain::{JobId, JobStatusSnapshot};
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Job whose output files are deleted
    #[arg(long)]
    pub job_id: JobId,
}

fn print_job(label: &str, job: &JobStatusSnapshot) {
    println!("{label}");
    println!("  Export job ID: {}", job.id);
    println!("  Job status: {}", job.job_status);
    println!("  Output URL: {}", job.output_url().unwrap_or("-"));
    println!("  Output deleted: {}", job.is_output_deleted);
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, loaded: LoadedConfig) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(loaded) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        match ctx.service.job_status(self.job_id).await {
            Ok(job) => print_job("📄 Before deletion:", &job),
            Err(e) => return Ok(report_failure("Failed to fetch export job", &e)),
        }

        if let Err(e) = ctx.service.delete_job_output(self.job_id).await {
            return Ok(report_failure("Failed to delete export job output", &e));
        }
        println!("🗑️  Output files deleted");

        match ctx.service.job_status(self.job_id).await {
            Ok(job) => print_job("📄 After deletion:", &job),
            Err(e) => return Ok(report_failure("Failed to fetch export job", &e)),
        }

        Ok(0)
    }
}
