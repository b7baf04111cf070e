//! JSON output formatter for machine-readable results.

use super::formatter::DownloadSummary;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error::one_line;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use tcfetch_core::FetchReport;

const OPERATION: &str = "download";

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SummaryOutput {
    build_id: String,
    archive_path: String,
    extract_dir: String,
    bytes_downloaded: u64,
    files_extracted: usize,
    directories_created: usize,
    bytes_written: u64,
    archive_removed: bool,
    duration_ms: u128,
}

impl From<&DownloadSummary> for SummaryOutput {
    fn from(summary: &DownloadSummary) -> Self {
        Self {
            build_id: summary.build_id.clone(),
            archive_path: summary.archive_path.display().to_string(),
            extract_dir: summary.extract_dir.display().to_string(),
            bytes_downloaded: summary.bytes_downloaded,
            files_extracted: summary.files_extracted,
            directories_created: summary.directories_created,
            bytes_written: summary.bytes_written,
            archive_removed: summary.archive_removed,
            duration_ms: summary.duration.as_millis(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_stage(&self, _message: &str) {}

    fn format_download_result(&self, _report: &FetchReport) {}

    fn format_summary(&self, summary: &DownloadSummary) -> Result<()> {
        Self::output(&JsonOutput::success(OPERATION, SummaryOutput::from(summary)))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let message = one_line(error);
        let _ = Self::output(&JsonOutput::<()>::error(OPERATION, message.as_str()));
        let _ = writeln!(io::stderr(), "error: {message}");
    }

    fn format_warning(&self, message: &str) {
        let _ = writeln!(io::stderr(), "warning: {message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_summary_output_fields() {
        let summary = DownloadSummary {
            build_id: "42".to_string(),
            archive_path: PathBuf::from("out/build-42-artifacts.zip"),
            extract_dir: PathBuf::from("out/build-42"),
            bytes_downloaded: 300,
            files_extracted: 2,
            directories_created: 1,
            bytes_written: 10,
            archive_removed: true,
            duration: Duration::from_millis(1500),
        };

        let value = serde_json::to_value(JsonOutput::success(
            OPERATION,
            SummaryOutput::from(&summary),
        ))
        .unwrap();

        assert_eq!(value["operation"], "download");
        assert_eq!(value["data"]["build_id"], "42");
        assert_eq!(value["data"]["files_extracted"], 2);
        assert_eq!(value["data"]["archive_removed"], true);
        assert_eq!(value["data"]["duration_ms"], 1500);
    }
}
