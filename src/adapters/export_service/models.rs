//! Export service API models
//!
//! Request and response structures of the export service REST API. These are
//! separate from the domain models and only handle the wire format.

use crate::domain::ids::JobId;
use crate::domain::{ExportJobSettings, JobStatusSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Envelope every service response is wrapped in
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueResponse<T> {
    #[serde(rename = "ExportJobID", default)]
    pub job_id: Option<JobId>,

    #[serde(default)]
    pub is_success: bool,

    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,

    /// Payload, absent on failed calls and on plain acknowledgements
    #[serde(default = "Option::default")]
    pub value: Option<T>,
}

impl<T> ValueResponse<T> {
    /// Drops the payload, keeping the outcome fields
    pub fn into_service_response(self) -> ServiceResponse {
        ServiceResponse {
            job_id: self.job_id,
            is_success: self.is_success,
            error_code: self.error_code,
            error_message: self.error_message,
        }
    }
}

/// Outcome of a call that carries no payload (start, cancel, delete)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceResponse {
    #[serde(rename = "ExportJobID", default)]
    pub job_id: Option<JobId>,

    #[serde(default)]
    pub is_success: bool,

    #[serde(default)]
    pub error_code: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl ServiceResponse {
    /// A successful acknowledgement
    pub fn success(job_id: JobId) -> Self {
        Self {
            job_id: Some(job_id),
            is_success: true,
            error_code: None,
            error_message: None,
        }
    }

    /// A refusal carrying the service's error code and message
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            job_id: None,
            is_success: false,
            error_code: Some(code.into()),
            error_message: Some(message.into()),
        }
    }

    /// Whether the service reported an error message
    pub fn has_error(&self) -> bool {
        self.error_message
            .as_deref()
            .map(|m| !m.is_empty())
            .unwrap_or(false)
    }

    /// Whether the call was declined, by flag or by message
    pub fn is_refused(&self) -> bool {
        !self.is_success || self.has_error()
    }

    /// `"<code> message"`
    pub fn error_summary(&self) -> String {
        format!(
            "<{}> {}",
            self.error_code.as_deref().unwrap_or_default(),
            self.error_message.as_deref().unwrap_or_default()
        )
    }
}

/// Payload of a create response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateJobValue {
    #[serde(default)]
    pub validation_errors: BTreeMap<String, String>,
}

/// Result of creating a job: validation outcome of the submitted settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub is_success: bool,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    /// Field path to problem description
    pub validation_errors: BTreeMap<String, String>,
}

impl ValidationResult {
    /// A passing validation
    pub fn success() -> Self {
        Self {
            is_success: true,
            ..Default::default()
        }
    }

    /// `"<code> message"`
    pub fn error_summary(&self) -> String {
        format!(
            "<{}> {}",
            self.error_code.as_deref().unwrap_or_default(),
            self.error_message.as_deref().unwrap_or_default()
        )
    }
}

impl From<ValueResponse<CreateJobValue>> for ValidationResult {
    fn from(response: ValueResponse<CreateJobValue>) -> Self {
        Self {
            is_success: response.is_success,
            error_code: response.error_code,
            error_message: response.error_message,
            validation_errors: response.value.unwrap_or_default().validation_errors,
        }
    }
}

/// One page of jobs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<JobStatusSnapshot>,
}

/// Body of a create request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateJobRequest<'a> {
    pub settings: &'a ExportJobSettings,
    pub application_name: &'a str,
    #[serde(rename = "CorrelationID")]
    pub correlation_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExportStatus;

    #[test]
    fn test_service_response_error_summary() {
        let response = ServiceResponse::failure("EXP-409", "Job already started");
        assert!(response.has_error());
        assert_eq!(response.error_summary(), "<EXP-409> Job already started");
        assert!(!ServiceResponse::success(JobId::generate()).has_error());
    }

    #[test]
    fn test_empty_error_message_is_not_an_error() {
        let response: ServiceResponse =
            serde_json::from_str(r#"{"IsSuccess": true, "ErrorCode": "", "ErrorMessage": ""}"#)
                .unwrap();
        assert!(!response.has_error());
        assert!(!response.is_refused());
    }

    #[test]
    fn test_unsuccessful_response_without_message_is_refused() {
        let response: ServiceResponse =
            serde_json::from_str(r#"{"IsSuccess": false, "ErrorCode": "EXP-1"}"#).unwrap();
        assert!(!response.has_error());
        assert!(response.is_refused());
        assert_eq!(response.error_summary(), "<EXP-1> ");
    }

    #[test]
    fn test_validation_result_from_envelope() {
        let json = r#"{
            "IsSuccess": false,
            "ErrorCode": "EXP-400",
            "ErrorMessage": "Settings are invalid",
            "Value": {
                "ValidationErrors": {
                    "ExportSourceSettings.ViewID": "View does not exist"
                }
            }
        }"#;
        let envelope: ValueResponse<CreateJobValue> = serde_json::from_str(json).unwrap();
        let result = ValidationResult::from(envelope);
        assert!(!result.is_success);
        assert_eq!(result.error_summary(), "<EXP-400> Settings are invalid");
        assert_eq!(
            result.validation_errors.get("ExportSourceSettings.ViewID").map(String::as_str),
            Some("View does not exist")
        );
    }

    #[test]
    fn test_job_list_envelope() {
        let json = r#"{
            "IsSuccess": true,
            "Value": {
                "Jobs": [
                    { "ID": "6f1c2b0e-5a44-4c8e-9d0f-2b7e0c1d3a55", "JobStatus": "New" },
                    { "ID": "0b8d4c1e-2f7a-4a51-8e3b-9c6d5e4f3a21", "JobStatus": "Completed" }
                ]
            }
        }"#;
        let envelope: ValueResponse<JobList> = serde_json::from_str(json).unwrap();
        let jobs = envelope.value.unwrap().jobs;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job_status, ExportStatus::New);
    }

    #[test]
    fn test_create_request_field_names() {
        let settings = ExportJobSettings::default();
        let request = CreateJobRequest {
            settings: &settings,
            application_name: "app",
            correlation_id: "corr",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["ApplicationName"], "app");
        assert_eq!(json["CorrelationID"], "corr");
        assert!(json["Settings"]["ExportSourceSettings"].is_object());
    }
}
