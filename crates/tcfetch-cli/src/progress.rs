//! Download progress bar.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use tcfetch_core::ProgressCallback;

const BAR_TEMPLATE: &str =
    "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner} {msg} {bytes} ({bytes_per_sec})";

/// Progress bar over the downloaded bytes, implementing `ProgressCallback`.
///
/// Falls back to a spinner when the server sends no `Content-Length`.
/// The bar is cleared when the download completes or the value drops.
pub struct CliProgress {
    bar: ProgressBar,
    bytes_written: u64,
}

impl CliProgress {
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_message(message.to_string());
        Self {
            bar,
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show(quiet: bool, json: bool) -> bool {
        !quiet && !json && Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_start(&mut self, total: Option<u64>) {
        let message = self.bar.message();
        self.bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(BAR_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("█▓░"),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .template(SPINNER_TEMPLATE)
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        self.bar.set_message(message);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar.set_position(self.bytes_written);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_callback_with_length() {
        let mut progress = CliProgress::new("Downloading");

        progress.on_start(Some(4096));
        progress.on_bytes_written(1024);
        progress.on_bytes_written(1024);

        assert_eq!(progress.bytes_written, 2048);
        assert_eq!(progress.bar.length(), Some(4096));
        assert_eq!(progress.bar.position(), 2048);
        progress.on_complete();
    }

    #[test]
    fn test_progress_callback_without_length() {
        let mut progress = CliProgress::new("Downloading");

        progress.on_start(None);
        progress.on_bytes_written(10);

        assert_eq!(progress.bar.position(), 10);
        assert_eq!(progress.bar.message(), "Downloading");
    }

    #[test]
    fn test_hidden_when_quiet_or_json() {
        assert!(!CliProgress::should_show(true, false));
        assert!(!CliProgress::should_show(false, true));
    }
}
