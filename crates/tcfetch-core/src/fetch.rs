//! Authenticated download of an artifact archive.

use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use tracing::debug;
use tracing::info;

use crate::config::Config;
use crate::error::FetchError;
use crate::error::MAX_ERROR_BODY;
use crate::report::FetchReport;
use crate::report::ProgressCallback;

/// Media type requested from the artifacts endpoint.
pub const ACCEPT_ZIP: &str = "application/zip";

const CHUNK_SIZE: usize = 64 * 1024;

/// Blocking HTTP fetcher bound to one server configuration.
///
/// Each call to [`Fetcher::fetch_to_file`] makes exactly one request; there
/// is no retry. The configured timeout bounds the whole transfer, body
/// included.
#[derive(Debug)]
pub struct Fetcher {
    client: Client,
    token: String,
    timeout: Duration,
}

impl Fetcher {
    /// Builds an HTTP client for `config`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            client,
            token: config.token().to_string(),
            timeout: config.timeout(),
        })
    }

    /// Downloads `url` into `dest`, replacing any existing file.
    ///
    /// Missing parent directories of `dest` are created. On a non-2xx
    /// response no file is created and the error carries the status code
    /// and the start of the response body.
    ///
    /// # Errors
    ///
    /// - `FetchError::Status` for a non-success HTTP status
    /// - `FetchError::Timeout` once the overall deadline passes
    /// - `FetchError::Network` for connection failures
    /// - `FetchError::Transfer` if the body stream breaks off for a reason
    ///   the client does not report itself
    /// - `FetchError::Io` if the destination cannot be written
    pub fn fetch_to_file(
        &self,
        url: &str,
        dest: &Path,
        progress: &mut dyn ProgressCallback,
    ) -> Result<FetchReport, FetchError> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let started = Instant::now();
        info!(url, "requesting artifact archive");

        let mut response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, ACCEPT_ZIP)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        debug!(status = status.as_u16(), content_length = ?response.content_length(), "response received");

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: read_error_body(&mut response),
            });
        }

        progress.on_start(response.content_length());

        let file = File::create(dest)?;
        let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
        let bytes_written = self.copy_body(&mut response, &mut writer, started, progress)?;
        writer.flush()?;
        progress.on_complete();

        let duration = started.elapsed();
        info!(bytes = bytes_written, ?duration, path = %dest.display(), "download complete");

        Ok(FetchReport {
            path: dest.to_path_buf(),
            status: status.as_u16(),
            bytes_written,
            duration,
        })
    }

    fn copy_body<W: Write>(
        &self,
        response: &mut Response,
        writer: &mut W,
        started: Instant,
        progress: &mut dyn ProgressCallback,
    ) -> Result<u64, FetchError> {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total: u64 = 0;

        loop {
            if started.elapsed() >= self.timeout {
                return Err(self.timed_out());
            }

            let read = match response.read(&mut buf) {
                Ok(0) => return Ok(total),
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.classify_read(e, started)),
            };

            writer.write_all(&buf[..read])?;
            total += read as u64;
            progress.on_bytes_written(read as u64);
        }
    }

    fn timed_out(&self) -> FetchError {
        FetchError::Timeout {
            limit: self.timeout,
        }
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            self.timed_out()
        } else {
            FetchError::Network(err)
        }
    }

    // Body read errors arrive as io::Error wrapping the client error.
    fn classify_read(&self, err: std::io::Error, started: Instant) -> FetchError {
        let inner_timeout = err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
            .is_some_and(reqwest::Error::is_timeout);

        if inner_timeout
            || err.kind() == std::io::ErrorKind::TimedOut
            || started.elapsed() >= self.timeout
        {
            return self.timed_out();
        }

        match err.into_inner() {
            Some(inner) => match inner.downcast::<reqwest::Error>() {
                Ok(reqwest_err) => FetchError::Network(*reqwest_err),
                Err(other) => FetchError::Transfer(std::io::Error::other(other)),
            },
            None => FetchError::Transfer(std::io::Error::other("connection closed mid-transfer")),
        }
    }
}

/// Reads at most [`MAX_ERROR_BODY`] bytes of an error response.
fn read_error_body(response: &mut Response) -> String {
    let mut buf = Vec::with_capacity(MAX_ERROR_BODY);
    // Best effort: a truncated error body is still useful.
    let _ = response
        .by_ref()
        .take(MAX_ERROR_BODY as u64)
        .read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).trim().to_string()
}
