//! Error conversion utilities for CLI.
//!
//! Wraps tcfetch-core's typed errors (thiserror) into contextual errors
//! (anyhow) tagged with the pipeline stage that failed.

use anyhow::Context;
use tcfetch_core::ExtractionError;
use tcfetch_core::FetchError;

/// Prefix for every failure while talking to the server.
pub const DOWNLOAD_FAILED: &str = "download failed";

/// Prefix for every failure while unpacking the archive.
pub const EXTRACTION_FAILED: &str = "extraction failed";

/// Tags a fetch result with the download stage.
pub fn add_download_context<T>(result: Result<T, FetchError>) -> anyhow::Result<T> {
    result.context(DOWNLOAD_FAILED)
}

/// Tags an extraction result with the extraction stage.
pub fn add_extraction_context<T>(result: Result<T, ExtractionError>) -> anyhow::Result<T> {
    result.context(EXTRACTION_FAILED)
}

/// Renders the whole error chain on a single line.
///
/// Server error bodies may span several lines; their line breaks are
/// collapsed so the message stays one line on stderr.
pub fn one_line(err: &anyhow::Error) -> String {
    format!("{err:#}")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
