//! Settings command implementation

use super::{report_failure, CommandContext, LoadedConfig};
use crate::domain::JobId;
use clap::Args;

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Job whose settings are printed
    #[arg(long)]
    pub job_id: JobId,
}

impl SettingsArgs {
    /// Execute the settings command
    pub async fn execute(&self, loaded: LoadedConfig) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(loaded) {
            Ok(ctx) => ctx,
            Err(code) => return Ok(code),
        };

        let settings = match ctx.service.job_settings(self.job_id).await {
            Ok(settings) => settings,
            Err(e) => return Ok(report_failure("Failed to fetch export job settings", &e)),
        };

        println!("{}", serde_json::to_string_pretty(&settings)?);
        Ok(0)
    }
}
