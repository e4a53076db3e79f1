//! Export job settings payload
//!
//! A single value type describing what an export job reads, which artifacts
//! it writes and how the output is laid out. Field names serialize in the
//! service's PascalCase form, so the same shape is used in `[job.settings]`
//! of the configuration file and on the wire.

use super::errors::CourierError;
use super::result::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the documents of an export come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    Folder,
    SavedSearch,
    Production,
    /// Non-document objects of a given artifact type
    Objects,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceType::Folder => "Folder",
            SourceType::SavedSearch => "SavedSearch",
            SourceType::Production => "Production",
            SourceType::Objects => "Objects",
        };
        f.write_str(name)
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "folder" => Ok(SourceType::Folder),
            "saved-search" | "savedsearch" | "saved_search" => Ok(SourceType::SavedSearch),
            "production" => Ok(SourceType::Production),
            "rdo" | "objects" => Ok(SourceType::Objects),
            other => Err(format!(
                "Unknown source type '{other}', expected folder, saved-search, production or rdo"
            )),
        }
    }
}

/// Document artifact type
pub const DOCUMENT_ARTIFACT_TYPE_ID: i32 = 10;

/// Source selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExportSourceSettings {
    pub export_source_type: SourceType,

    /// Folder, saved search or production ID; unused for object exports
    #[serde(rename = "ExportSourceArtifactID")]
    pub export_source_artifact_id: Option<i64>,

    #[serde(rename = "ViewID")]
    pub view_id: Option<i64>,

    #[serde(rename = "ArtifactTypeID")]
    pub artifact_type_id: i32,

    pub include_subfolders: bool,

    pub start_at_document_number: i64,
}

impl Default for ExportSourceSettings {
    fn default() -> Self {
        Self {
            export_source_type: SourceType::Folder,
            export_source_artifact_id: Some(1003697),
            view_id: Some(1042326),
            artifact_type_id: DOCUMENT_ARTIFACT_TYPE_ID,
            include_subfolders: false,
            start_at_document_number: 1,
        }
    }
}

/// Image rendition of exported images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageType {
    SinglePage,
    MultiPage,
    Pdf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageExportSettings {
    /// `-1` selects original images
    #[serde(rename = "ImagePrecedenceArtifactIDs")]
    pub image_precedence_artifact_ids: Vec<i64>,
    pub type_of_image: ImageType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FullTextExportSettings {
    pub export_full_text_as_file: bool,
    pub text_file_encoding: String,
    #[serde(rename = "PrecedenceFieldsArtifactIDs")]
    pub precedence_fields_artifact_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NativeExportSettings {
    /// `-1` selects original native files
    #[serde(rename = "NativePrecedenceArtifactIDs")]
    pub native_precedence_artifact_ids: Vec<i64>,
}

impl Default for NativeExportSettings {
    fn default() -> Self {
        Self {
            native_precedence_artifact_ids: vec![-1],
        }
    }
}

/// Which artifacts and fields are exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExportArtifactSettings {
    /// `None` keeps the service's default pattern
    pub file_name_pattern: Option<String>,
    pub apply_file_name_pattern_to_images: bool,
    pub images: Option<ImageExportSettings>,
    pub full_text: Option<FullTextExportSettings>,
    pub native: Option<NativeExportSettings>,
    pub export_pdf: bool,
    #[serde(rename = "FieldArtifactIDs")]
    pub field_artifact_ids: Vec<i64>,
    pub export_multi_choices_as_nested: bool,
}

impl Default for ExportArtifactSettings {
    fn default() -> Self {
        Self {
            file_name_pattern: None,
            apply_file_name_pattern_to_images: false,
            images: None,
            full_text: None,
            native: Some(NativeExportSettings::default()),
            export_pdf: false,
            field_artifact_ids: vec![1003676, 1003667],
            export_multi_choices_as_nested: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubdirectorySettings {
    pub subdirectory_start_number: u32,
    pub max_number_of_files_in_directory: u32,
    pub image_subdirectory_prefix: String,
    pub native_subdirectory_prefix: String,
    pub full_text_subdirectory_prefix: String,
    pub pdf_subdirectory_prefix: String,
    pub subdirectory_digit_padding: u32,
}

impl Default for SubdirectorySettings {
    fn default() -> Self {
        Self {
            subdirectory_start_number: 1,
            max_number_of_files_in_directory: 100,
            image_subdirectory_prefix: "IMAGE_".to_string(),
            native_subdirectory_prefix: "NATIVE_".to_string(),
            full_text_subdirectory_prefix: "FULLTEXT_".to_string(),
            pdf_subdirectory_prefix: "PDF_".to_string(),
            subdirectory_digit_padding: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VolumeSettings {
    pub volume_prefix: String,
    pub volume_start_number: u32,
    pub volume_max_size_in_megabytes: u64,
    pub volume_digit_padding: u32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            volume_prefix: "VOL_FOLDER_".to_string(),
            volume_start_number: 1,
            volume_max_size_in_megabytes: 100,
            volume_digit_padding: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadFileFormat {
    #[serde(rename = "CSV")]
    Csv,
    #[serde(rename = "DAT")]
    Dat,
    #[serde(rename = "HTML")]
    Html,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageLoadFileFormat {
    #[serde(rename = "IPRO")]
    Ipro,
    #[serde(rename = "IPRO_FullText")]
    IproFullText,
    Opticon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PdfLoadFileFormat {
    #[serde(rename = "IPRO")]
    Ipro,
    #[serde(rename = "IPRO_FullText")]
    IproFullText,
    Opticon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoadFileSettings {
    pub load_file_format: LoadFileFormat,
    pub encoding: String,
    pub image_load_file_format: ImageLoadFileFormat,
    pub pdf_file_format: PdfLoadFileFormat,
    /// .NET style format string, `"O"` is round-trip ISO 8601
    pub date_time_format: Option<String>,
}

impl Default for LoadFileSettings {
    fn default() -> Self {
        Self {
            load_file_format: LoadFileFormat::Csv,
            encoding: "UTF-8".to_string(),
            image_load_file_format: ImageLoadFileFormat::Ipro,
            pdf_file_format: PdfLoadFileFormat::IproFullText,
            date_time_format: Some("O".to_string()),
        }
    }
}

/// Output layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExportOutputSettings {
    pub create_archive: bool,
    /// `None` lets the service pick its default destination
    pub destination_path: Option<String>,
    pub subdirectory_settings: SubdirectorySettings,
    pub volume_settings: VolumeSettings,
    pub load_file_settings: LoadFileSettings,
}

/// Complete settings of one export job
///
/// The default value exports native files of a folder together with two
/// document fields.
///
/// # Examples
///
/// ```
/// use courier::domain::settings::{ExportJobSettings, SourceType};
///
/// let settings = ExportJobSettings::default()
///     .with_source(SourceType::SavedSearch, Some(1042300), None);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportJobSettings {
    #[serde(rename = "ExportSourceSettings")]
    pub source: ExportSourceSettings,

    #[serde(rename = "ExportArtifactSettings")]
    pub artifacts: ExportArtifactSettings,

    #[serde(rename = "ExportOutputSettings")]
    pub output: ExportOutputSettings,
}

impl ExportJobSettings {
    /// Replaces the source selection, keeping the other source options
    ///
    /// Object exports take their artifact type from `source_id` when given.
    pub fn with_source(mut self, kind: SourceType, source_id: Option<i64>, view_id: Option<i64>) -> Self {
        self.source.export_source_type = kind;
        match kind {
            SourceType::Objects => {
                if let Some(artifact_type) = source_id.and_then(|id| i32::try_from(id).ok()) {
                    self.source.artifact_type_id = artifact_type;
                }
                self.source.export_source_artifact_id = None;
            }
            _ => {
                self.source.artifact_type_id = DOCUMENT_ARTIFACT_TYPE_ID;
                if source_id.is_some() {
                    self.source.export_source_artifact_id = source_id;
                }
            }
        }
        if view_id.is_some() {
            self.source.view_id = view_id;
        }
        self
    }

    /// Checks the settings before they are sent to the service
    ///
    /// All problems are collected into one `Validation` error.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        let source = &self.source;
        match (source.export_source_type, source.export_source_artifact_id) {
            (SourceType::Objects, _) => {
                if source.view_id.is_none() {
                    problems.push("object exports require a view ID".to_string());
                }
            }
            (kind, None) => problems.push(format!("{kind} source requires a source artifact ID")),
            (_, Some(id)) if id <= 0 => {
                problems.push(format!("source artifact ID must be positive, got {id}"))
            }
            _ => {}
        }
        if let Some(view_id) = source.view_id {
            if view_id <= 0 {
                problems.push(format!("view ID must be positive, got {view_id}"));
            }
        }
        if source.artifact_type_id <= 0 {
            problems.push(format!(
                "artifact type ID must be positive, got {}",
                source.artifact_type_id
            ));
        }
        if source.start_at_document_number < 1 {
            problems.push("start-at document number must be at least 1".to_string());
        }

        let artifacts = &self.artifacts;
        if artifacts.field_artifact_ids.is_empty() {
            problems.push("at least one field artifact ID is required".to_string());
        }
        if let Some(full_text) = &artifacts.full_text {
            if full_text.text_file_encoding.trim().is_empty() {
                problems.push("full text encoding cannot be empty".to_string());
            }
        }
        if let Some(images) = &artifacts.images {
            if images.image_precedence_artifact_ids.is_empty() {
                problems.push("image precedence list cannot be empty".to_string());
            }
        }

        let output = &self.output;
        let subdirectories = &output.subdirectory_settings;
        if subdirectories.subdirectory_digit_padding == 0 {
            problems.push("subdirectory digit padding must be greater than 0".to_string());
        }
        if subdirectories.max_number_of_files_in_directory == 0 {
            problems.push("max files per directory must be greater than 0".to_string());
        }
        let volume = &output.volume_settings;
        if volume.volume_digit_padding == 0 {
            problems.push("volume digit padding must be greater than 0".to_string());
        }
        if volume.volume_max_size_in_megabytes == 0 {
            problems.push("volume max size must be greater than 0".to_string());
        }
        if output.load_file_settings.encoding.trim().is_empty() {
            problems.push("load file encoding cannot be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CourierError::Validation(format!(
                "Invalid export settings: {}",
                problems.join("; ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = ExportJobSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.source.artifact_type_id, 10);
        assert_eq!(settings.output.volume_settings.volume_prefix, "VOL_FOLDER_");
        assert_eq!(settings.output.subdirectory_settings.subdirectory_digit_padding, 5);
    }

    #[test]
    fn test_serializes_service_field_names() {
        let json = serde_json::to_value(ExportJobSettings::default()).unwrap();
        let source = &json["ExportSourceSettings"];
        assert_eq!(source["ExportSourceType"], "Folder");
        assert_eq!(source["ExportSourceArtifactID"], 1003697);
        assert_eq!(source["ViewID"], 1042326);
        assert_eq!(
            json["ExportArtifactSettings"]["FieldArtifactIDs"],
            serde_json::json!([1003676, 1003667])
        );
        assert_eq!(
            json["ExportOutputSettings"]["LoadFileSettings"]["PdfFileFormat"],
            "IPRO_FullText"
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
            [ExportSourceSettings]
            ExportSourceType = "SavedSearch"
            ExportSourceArtifactID = 1042300

            [ExportOutputSettings.VolumeSettings]
            VolumePrefix = "VOL_SEARCH_"
        "#;
        let settings: ExportJobSettings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.source.export_source_type, SourceType::SavedSearch);
        assert_eq!(settings.source.view_id, Some(1042326));
        assert_eq!(settings.output.volume_settings.volume_prefix, "VOL_SEARCH_");
        assert_eq!(settings.output.volume_settings.volume_digit_padding, 5);
    }

    #[test_case("folder", SourceType::Folder; "folder")]
    #[test_case("saved-search", SourceType::SavedSearch; "saved search")]
    #[test_case("Production", SourceType::Production; "production")]
    #[test_case("rdo", SourceType::Objects; "rdo")]
    fn test_source_type_from_str(input: &str, expected: SourceType) {
        assert_eq!(input.parse::<SourceType>().unwrap(), expected);
    }

    #[test]
    fn test_source_type_rejects_unknown() {
        assert!("volume".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_with_source_objects_uses_artifact_type() {
        let settings = ExportJobSettings::default().with_source(
            SourceType::Objects,
            Some(1000051),
            Some(1042400),
        );
        assert_eq!(settings.source.artifact_type_id, 1000051);
        assert_eq!(settings.source.export_source_artifact_id, None);
        assert_eq!(settings.source.view_id, Some(1042400));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_all_problems() {
        let mut settings = ExportJobSettings::default();
        settings.artifacts.field_artifact_ids.clear();
        settings.output.volume_settings.volume_digit_padding = 0;
        settings.source.export_source_artifact_id = Some(-5);

        let err = settings.validate().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CourierError::Validation(_)));
        assert!(message.contains("field artifact ID"));
        assert!(message.contains("volume digit padding"));
        assert!(message.contains("must be positive"));
    }

    #[test]
    fn test_validate_requires_source_id_for_documents() {
        let mut settings = ExportJobSettings::default();
        settings.source.export_source_artifact_id = None;
        assert!(settings.validate().is_err());
    }
}
