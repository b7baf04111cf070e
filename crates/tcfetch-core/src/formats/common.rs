//! Filesystem writes shared by the archive extractors.
//!
//! Both helpers take paths that were already produced by
//! [`DestDir::join`](crate::types::DestDir::join) on a validated
//! [`SafePath`](crate::types::SafePath).

use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;

const WRITE_BUFFER_SIZE: usize = 64 * 1024;

/// Writes one file entry, creating missing parent directories first.
///
/// An existing file at `output_path` is truncated. The writer is flushed
/// before returning so a write error is not lost on drop.
///
/// # Errors
///
/// Returns error if:
/// - Parent directory creation fails
/// - File creation fails
/// - I/O error during copy
pub fn extract_file<R: Read>(
    reader: &mut R,
    output_path: &Path,
    report: &mut ExtractionReport,
) -> Result<u64> {
    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    let output_file = File::create(output_path)?;
    let mut buffered_writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, output_file);
    let bytes_written = std::io::copy(reader, &mut buffered_writer)?;
    buffered_writer.flush()?;

    report.files_extracted += 1;
    report.bytes_written = report
        .bytes_written
        .checked_add(bytes_written)
        .ok_or_else(|| {
            ExtractionError::Io(std::io::Error::other("total extracted size overflowed"))
        })?;

    Ok(bytes_written)
}

/// Creates a directory entry and all missing ancestors.
///
/// Idempotent: an already existing directory is not an error.
///
/// # Errors
///
/// Returns error if directory creation fails.
pub fn create_directory(output_path: &Path, report: &mut ExtractionReport) -> Result<()> {
    create_dir_all(output_path)?;
    report.directories_created += 1;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_extract_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a").join("b").join("file.txt");
        let mut report = ExtractionReport::new();

        let written = extract_file(&mut Cursor::new(b"hello"), &target, &mut report).unwrap();

        assert_eq!(written, 5);
        assert_eq!(std::fs::read(&target).unwrap(), b"hello");
        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.bytes_written, 5);
    }

    #[test]
    fn test_extract_file_truncates_existing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("file.txt");
        std::fs::write(&target, "a much longer previous content").unwrap();
        let mut report = ExtractionReport::new();

        extract_file(&mut Cursor::new(b"new"), &target, &mut report).unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_extract_file_empty() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("empty.bin");
        let mut report = ExtractionReport::new();

        let written = extract_file(&mut std::io::empty(), &target, &mut report).unwrap();

        assert_eq!(written, 0);
        assert!(target.is_file());
    }

    #[test]
    fn test_extract_file_onto_directory_fails() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("dir");
        std::fs::create_dir(&target).unwrap();
        let mut report = ExtractionReport::new();

        let result = extract_file(&mut Cursor::new(b"x"), &target, &mut report);

        assert!(matches!(result, Err(ExtractionError::Io(_))));
        assert_eq!(report.files_extracted, 0);
    }

    #[test]
    fn test_create_directory_idempotent() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("x").join("y");
        let mut report = ExtractionReport::new();

        create_directory(&target, &mut report).unwrap();
        create_directory(&target, &mut report).unwrap();

        assert!(target.is_dir());
        assert_eq!(report.directories_created, 2);
    }
}
