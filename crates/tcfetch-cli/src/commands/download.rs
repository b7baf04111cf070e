//! Download-and-extract pipeline.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tcfetch_core::BuildLayout;
use tcfetch_core::Config;
use tcfetch_core::Fetcher;
use tcfetch_core::NoopProgress;
use tcfetch_core::ProgressCallback;
use tcfetch_core::count_files;
use tcfetch_core::extract_archive;
use tracing::debug;
use tracing::info;

use crate::cli::Cli;
use crate::error::add_download_context;
use crate::error::add_extraction_context;
use crate::output::DownloadSummary;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;

/// Fetches the artifact archive of `cli.build_id`, unpacks it next to the
/// archive and removes the archive afterwards.
///
/// Configuration is checked before any network traffic. A failed cleanup
/// is reported as a warning and does not fail the run.
pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let started = Instant::now();
    let config = Config::from_env()?;
    let layout = BuildLayout::new(&cli.build_id, &cli.output_dir)?;

    formatter.format_stage(&format!(
        "Downloading artifacts for build {}...",
        layout.build_id()
    ));

    let fetcher = add_download_context(Fetcher::new(&config))?;
    let url = layout.artifacts_url(&config);
    let mut progress: Box<dyn ProgressCallback> = if CliProgress::should_show(cli.quiet, cli.json)
    {
        Box::new(CliProgress::new("Downloading"))
    } else {
        Box::new(NoopProgress)
    };
    let fetched = add_download_context(fetcher.fetch_to_file(
        &url,
        layout.archive_path(),
        progress.as_mut(),
    ))?;
    drop(progress);
    formatter.format_download_result(&fetched);

    formatter.format_stage(&format!(
        "Extracting to: {}",
        layout.extract_dir().display()
    ));
    let report = add_extraction_context(extract_archive(
        layout.archive_path(),
        layout.extract_dir(),
    ))?;

    let archive_removed = remove_archive(layout.archive_path(), formatter);

    let files_extracted = count_files(layout.extract_dir());
    info!(
        build_id = layout.build_id(),
        files = files_extracted,
        dir = %layout.extract_dir().display(),
        "artifacts extracted"
    );

    formatter.format_summary(&DownloadSummary {
        build_id: layout.build_id().to_string(),
        archive_path: layout.archive_path().to_path_buf(),
        extract_dir: layout.extract_dir().to_path_buf(),
        bytes_downloaded: fetched.bytes_written,
        files_extracted,
        directories_created: report.directories_created,
        bytes_written: report.bytes_written,
        archive_removed,
        duration: started.elapsed(),
    })
}

/// Deletes the downloaded archive. A failure is shown once, as a warning
/// through `formatter`, and only traced at debug level.
fn remove_archive(path: &Path, formatter: &dyn OutputFormatter) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "could not remove archive");
            formatter.format_warning(&format!("could not remove zip file: {err}"));
            false
        }
    }
}
