//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers the export service hands out.
//! Each type ensures type safety and validates format on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Workspace identifier newtype wrapper
///
/// A workspace is the tenant scope every export job lives in.
/// Workspace IDs are positive artifact IDs.
///
/// # Examples
///
/// ```
/// use courier::domain::ids::WorkspaceId;
/// use std::str::FromStr;
///
/// let workspace_id = WorkspaceId::from_str("1020245").unwrap();
/// assert_eq!(workspace_id.get(), 1020245);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct WorkspaceId(i64);

impl WorkspaceId {
    /// Creates a new WorkspaceId
    ///
    /// Returns `Err` if the ID is not positive.
    pub fn new(id: i64) -> Result<Self, String> {
        if id <= 0 {
            return Err(format!("Workspace ID must be positive, got {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the raw artifact ID
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for WorkspaceId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkspaceId> for i64 {
    fn from(id: WorkspaceId) -> Self {
        id.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkspaceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("Invalid workspace ID '{s}': {e}"))?;
        Self::new(id)
    }
}

/// Export job identifier newtype wrapper
///
/// Job IDs are GUIDs chosen by the caller at creation time.
///
/// # Examples
///
/// ```
/// use courier::domain::ids::JobId;
/// use std::str::FromStr;
///
/// let job_id = JobId::from_str("6f1c2b0e-5a44-4c8e-9d0f-2b7e0c1d3a55").unwrap();
/// assert_eq!(job_id.to_string(), "6f1c2b0e-5a44-4c8e-9d0f-2b7e0c1d3a55");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generates a fresh random job ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Whether this is the all-zero placeholder ID
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid job ID '{s}': {e}"))
    }
}
