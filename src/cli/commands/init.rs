//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "courier.toml")]
    pub output: String,

    /// Include every export setting with its default value
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Courier configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            generate_config_with_examples()
        } else {
            generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your instance URL and workspace", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set COURIER_SERVICE_USERNAME and COURIER_SERVICE_PASSWORD");
                println!("  3. Validate configuration: courier validate-config");
                println!("  4. Run an export: courier run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }
}

/// Minimal configuration relying on built-in defaults
pub fn generate_minimal_config() -> String {
    r#"# Courier Configuration File
# Export job client

environment = "development"  # development | staging | production

[application]
log_level = "info"

[service]
base_url = "https://relativity.example.com/Relativity.REST/api"
username = "${COURIER_SERVICE_USERNAME}"
password = "${COURIER_SERVICE_PASSWORD}"
timeout_seconds = 60
tls_verify = true

[polling]
interval_ms = 5000
retry_delay_ms = 3000
max_retries = 3

[job]
workspace_id = 1020245
application_name = "Export-Service-Sample-App"
correlation_id = "Sample-Job-0001"

[job.settings.ExportSourceSettings]
ExportSourceType = "Folder"
ExportSourceArtifactID = 1003697
ViewID = 1042326

[bulk]
list_limit = 1000

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
    .to_string()
}

/// Configuration listing every section and export setting
pub fn generate_config_with_examples() -> String {
    r#"# Courier Configuration File
# Export job client
#
# Values like ${VAR} are substituted from the environment (and .env).
# Any key can also be overridden with COURIER_<SECTION>_<KEY>,
# e.g. COURIER_POLLING_INTERVAL_MS=2000.

# Runtime environment: development | staging | production
# TLS verification cannot be disabled in production.
environment = "development"

[application]
# trace | debug | info | warn | error
log_level = "info"

[service]
# Base URL of the REST API, without the /export/v1 suffix
base_url = "https://relativity.example.com/Relativity.REST/api"
username = "${COURIER_SERVICE_USERNAME}"
password = "${COURIER_SERVICE_PASSWORD}"
timeout_seconds = 60
tls_verify = true

[polling]
# Wait between status fetches of a running job
interval_ms = 5000
# Wait after a failed status fetch
retry_delay_ms = 3000
# Consecutive failed fetches tolerated before giving up
max_retries = 3
# Progress line refresh
progress_interval_ms = 100
report_progress = true

[job]
workspace_id = 1020245
application_name = "Export-Service-Sample-App"
correlation_id = "Sample-Job-0001"

# Export settings use the service's field names.

[job.settings.ExportSourceSettings]
# Folder | SavedSearch | Production | Objects
ExportSourceType = "Folder"
ExportSourceArtifactID = 1003697
ViewID = 1042326
ArtifactTypeID = 10
IncludeSubfolders = false
StartAtDocumentNumber = 1

[job.settings.ExportArtifactSettings]
ApplyFileNamePatternToImages = false
ExportPdf = false
FieldArtifactIDs = [1003676, 1003667]
ExportMultiChoicesAsNested = false

[job.settings.ExportArtifactSettings.Native]
NativePrecedenceArtifactIDs = [-1]

# [job.settings.ExportArtifactSettings.Images]
# ImagePrecedenceArtifactIDs = [-1]
# TypeOfImage = "SinglePage"  # SinglePage | MultiPage | Pdf

# [job.settings.ExportArtifactSettings.FullText]
# ExportFullTextAsFile = true
# TextFileEncoding = "UTF-8"
# PrecedenceFieldsArtifactIDs = [1003668]

[job.settings.ExportOutputSettings]
CreateArchive = false

[job.settings.ExportOutputSettings.SubdirectorySettings]
SubdirectoryStartNumber = 1
MaxNumberOfFilesInDirectory = 100
ImageSubdirectoryPrefix = "IMAGE_"
NativeSubdirectoryPrefix = "NATIVE_"
FullTextSubdirectoryPrefix = "FULLTEXT_"
PdfSubdirectoryPrefix = "PDF_"
SubdirectoryDigitPadding = 5

[job.settings.ExportOutputSettings.VolumeSettings]
VolumePrefix = "VOL_FOLDER_"
VolumeStartNumber = 1
VolumeMaxSizeInMegabytes = 100
VolumeDigitPadding = 5

[job.settings.ExportOutputSettings.LoadFileSettings]
LoadFileFormat = "CSV"           # CSV | DAT | HTML | Custom
Encoding = "UTF-8"
ImageLoadFileFormat = "IPRO"     # IPRO | IPRO_FullText | Opticon
PdfFileFormat = "IPRO_FullText"  # IPRO | IPRO_FullText | Opticon
DateTimeFormat = "O"

[bulk]
# Jobs start-all creates before starting every job in New status
create_jobs = 0
# Page size when listing jobs (1-1000)
list_limit = 1000

[logging]
local_enabled = true
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
    .to_string()
}
