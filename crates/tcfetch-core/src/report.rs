//! Operation reporting for downloads and extractions.

use std::path::PathBuf;
use std::time::Duration;

/// Report of an archive extraction operation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Report of a completed artifact download.
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// File the response body was written to.
    pub path: PathBuf,

    /// HTTP status of the response.
    pub status: u16,

    /// Number of body bytes written.
    pub bytes_written: u64,

    /// Wall-clock time of the transfer.
    pub duration: Duration,
}

impl FetchReport {
    /// Size of the download in mebibytes.
    #[must_use]
    pub fn megabytes(&self) -> f64 {
        self.bytes_written as f64 / (1024.0 * 1024.0)
    }
}

/// Callback trait for download progress.
///
/// # Examples
///
/// ```
/// use tcfetch_core::ProgressCallback;
///
/// struct Counter(u64);
///
/// impl ProgressCallback for Counter {
///     fn on_start(&mut self, _total: Option<u64>) {}
///
///     fn on_bytes_written(&mut self, bytes: u64) {
///         self.0 += bytes;
///     }
///
///     fn on_complete(&mut self) {
///         println!("{} bytes", self.0);
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called once the response headers arrived.
    ///
    /// `total` is the announced body length, if the server sent one.
    fn on_start(&mut self, total: Option<u64>);

    /// Called after each chunk is written to disk.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when the body has been fully written.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_start(&mut self, _total: Option<u64>) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_complete(&mut self) {}
}
