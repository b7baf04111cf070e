//! Output formatter trait for CLI results.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tcfetch_core::FetchReport;

/// Outcome of a full download-and-extract run.
#[derive(Debug)]
pub struct DownloadSummary {
    pub build_id: String,
    pub archive_path: PathBuf,
    pub extract_dir: PathBuf,
    pub bytes_downloaded: u64,
    pub files_extracted: usize,
    pub directories_created: usize,
    pub bytes_written: u64,
    pub archive_removed: bool,
    pub duration: Duration,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Announce a pipeline stage
    fn format_stage(&self, message: &str);

    /// Format the result of the download step
    fn format_download_result(&self, report: &FetchReport);

    /// Format the final summary
    fn format_summary(&self, summary: &DownloadSummary) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let output = JsonOutput::success("download", serde_json::json!({"files_extracted": 2}));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["operation"], "download");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["files_extracted"], 2);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_shape() {
        let output = JsonOutput::<()>::error("download", "download failed: HTTP 404: not found");
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value.get("data").is_none());
        assert_eq!(value["error"], "download failed: HTTP 404: not found");
    }
}
