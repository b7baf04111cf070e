//! High-level public API for archive extraction.

use std::path::Path;

use walkdir::WalkDir;

use crate::ExtractionReport;
use crate::Result;
use crate::formats::ZipArchive;
use crate::types::DestDir;

/// Extracts a ZIP archive into the specified output directory.
///
/// The archive is opened before the output directory is touched, so an
/// invalid archive leaves no directory behind. The output directory and
/// its missing ancestors are created as needed.
///
/// # Arguments
///
/// * `archive_path` - Path to the archive file
/// * `output_dir` - Directory where files will be extracted
///
/// # Errors
///
/// Returns an error if:
/// - Archive file cannot be opened (`ExtractionError::Io`)
/// - Archive is not a valid ZIP (`ExtractionError::InvalidArchive`)
/// - An entry would escape `output_dir` (`ExtractionError::PathTraversal`)
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use tcfetch_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("build-42-artifacts.zip", "build-42")?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
) -> Result<ExtractionReport> {
    let mut archive = ZipArchive::open(archive_path.as_ref())?;
    let dest = DestDir::create(output_dir.as_ref().to_path_buf())?;
    archive.extract(&dest)
}

/// Counts everything that is not a directory below `dir`.
///
/// Unreadable subtrees are skipped rather than reported.
pub fn count_files<P: AsRef<Path>>(dir: P) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| !entry.file_type().is_dir())
        .count()
}
