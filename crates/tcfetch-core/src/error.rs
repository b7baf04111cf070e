//! Error types for artifact download and archive extraction.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Maximum number of response body bytes kept in a `FetchError::Status`.
pub const MAX_ERROR_BODY: usize = 4096;

/// Errors that can occur during archive extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted or not a ZIP archive at all.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Entry would be written outside the extraction directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The entry name as stored in the archive.
        path: PathBuf,
    },
}

impl ExtractionError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tcfetch_core::ExtractionError;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::InvalidArchive("bad header".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }
}

impl From<zip::result::ZipError> for ExtractionError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

/// Errors that can occur while downloading an artifact archive.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, TLS or protocol failure below the HTTP status level.
    #[error("network error")]
    Network(#[source] reqwest::Error),

    /// The overall transfer deadline elapsed.
    #[error("request timed out after {}s", limit.as_secs())]
    Timeout {
        /// The configured overall timeout.
        limit: Duration,
    },

    /// Server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Up to [`MAX_ERROR_BODY`] bytes of the response body, trimmed.
        body: String,
    },

    /// Connection dropped or failed while the body was streaming.
    #[error("transfer interrupted")]
    Transfer(#[source] std::io::Error),

    /// Local file could not be created or written.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Returns the HTTP status code for protocol errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the failure was the overall deadline.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
