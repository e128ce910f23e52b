//! OCR conversion job types

use serde::{Deserialize, Serialize};

/// Lifecycle status of a conversion job
///
/// Unknown strings from newer backends are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
    Other(String),
}

impl JobStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    /// No further progress will be reported for the job.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// The backend accepts `/retry` only for these.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled)
    }
}

impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<JobStatus> for String {
    fn from(value: JobStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversion job record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionJob {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub total_files: Option<usize>,
    #[serde(default)]
    pub processed_files: Option<usize>,
    #[serde(default)]
    pub ocr_language: Option<String>,
    #[serde(default)]
    pub confidence_threshold: Option<f64>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Polling view of a job (`/conversion/{id}/status`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionProgress {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub processed_files: usize,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub estimated_time_remaining: Option<f64>,
}

/// Request body for the `/conversion/start*` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folder_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub language: String,
    pub confidence_threshold: f64,
    pub preprocessing: bool,
}

impl ConversionRequest {
    fn base() -> Self {
        Self {
            file_ids: Vec::new(),
            folder_names: Vec::new(),
            name: None,
            language: "jpn+eng".to_string(),
            confidence_threshold: 30.0,
            preprocessing: true,
        }
    }

    /// Convert the given uploaded files
    #[must_use]
    pub fn for_files<I, S>(file_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { file_ids: file_ids.into_iter().map(Into::into).collect(), ..Self::base() }
    }

    /// Convert every completed upload in the given folders
    #[must_use]
    pub fn for_folders<I, S>(folder_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { folder_names: folder_names.into_iter().map(Into::into).collect(), ..Self::base() }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub const fn confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn preprocessing(mut self, enabled: bool) -> Self {
        self.preprocessing = enabled;
        self
    }
}

/// Response of the start endpoints
///
/// `/start` returns a single `job`; `/start-with-files` and
/// `/start-with-folders` return one job per file or folder in `jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStarted {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub job: Option<ConversionJob>,
    #[serde(default)]
    pub jobs: Vec<ConversionJob>,
    #[serde(default)]
    pub total_files: Option<usize>,
}

impl ConversionStarted {
    /// All jobs created by the call, whichever shape the backend used.
    #[must_use]
    pub fn into_jobs(self) -> Vec<ConversionJob> {
        self.job.into_iter().chain(self.jobs).collect()
    }
}

/// Response of job listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub jobs: Vec<ConversionJob>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_round_trips_verbatim() {
        let status: JobStatus = serde_json::from_str(r#""queued""#).unwrap();
        assert_eq!(status, JobStatus::Other("queued".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""queued""#);
        assert!(!status.is_terminal());
    }

    #[test]
    fn request_serializes_backend_defaults() {
        let request = ConversionRequest::for_files(["a", "b"]).named("spring catalogue");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "fileIds": ["a", "b"],
                "name": "spring catalogue",
                "language": "jpn+eng",
                "confidenceThreshold": 30.0,
                "preprocessing": true
            })
        );
    }

    #[test]
    fn started_collects_both_shapes() {
        let single: ConversionStarted = serde_json::from_value(serde_json::json!({
            "success": true,
            "job": {"id": "j1", "status": "pending", "fileIds": ["a"]}
        }))
        .unwrap();
        assert_eq!(single.into_jobs().len(), 1);

        let many: ConversionStarted = serde_json::from_value(serde_json::json!({
            "success": true,
            "totalFiles": 2,
            "jobs": [
                {"id": "j1", "status": "pending"},
                {"id": "j2", "status": "pending"}
            ]
        }))
        .unwrap();
        let jobs = many.into_jobs();
        assert_eq!(jobs.len(), 2);
        assert!(JobStatus::Failed.is_retryable());
        assert!(!jobs[1].status.is_retryable());
    }
}
