//! Human-readable output formatter with colors and styling.

use super::formatter::DownloadSummary;
use super::formatter::OutputFormatter;
use crate::error::one_line;
use anyhow::Result;
use console::Term;
use console::style;
use tcfetch_core::FetchReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_stage(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(message);
    }

    fn format_download_result(&self, report: &FetchReport) {
        if self.quiet {
            return;
        }
        let _ = self
            .term
            .write_line(&format!("Downloaded {:.2} MB", report.megabytes()));
        let _ = self
            .term
            .write_line(&format!("Downloaded: {}", report.path.display()));
        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }
    }

    fn format_summary(&self, summary: &DownloadSummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "Extracted {} files to {}",
            summary.files_extracted,
            summary.extract_dir.display()
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Directories: {}", summary.directories_created));
            let _ = self.term.write_line(&format!(
                "  Total size: {}",
                Self::format_size(summary.bytes_written)
            ));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", summary.duration));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let label = if console::colors_enabled_stderr() {
            style("error:").red().bold().to_string()
        } else {
            "error:".to_string()
        };
        let _ = self
            .err_term
            .write_line(&format!("{label} {}", one_line(error)));
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let label = if console::colors_enabled_stderr() {
            style("warning:").yellow().bold().to_string()
        } else {
            "warning:".to_string()
        };
        let _ = self.err_term.write_line(&format!("{label} {message}"));
    }
}
