//! ZIP archive format handler.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::ExtractionReport;
use crate::Result;
use crate::types::DestDir;
use crate::types::EntryType;
use crate::types::SafePath;

use super::common::create_directory;
use super::common::extract_file;

/// ZIP archive handler.
///
/// Entries are processed strictly in archive order. The first entry that
/// fails validation or cannot be written aborts the whole extraction.
pub struct ZipArchive<R> {
    inner: ::zip::ZipArchive<R>,
}

impl ZipArchive<BufReader<File>> {
    /// Opens a ZIP archive from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Io` if the file cannot be opened and
    /// `ExtractionError::InvalidArchive` if it is not a ZIP archive.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> ZipArchive<R> {
    /// Reads the central directory of a ZIP archive.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArchive` if the data is not a ZIP
    /// archive.
    pub fn new(reader: R) -> Result<Self> {
        let inner = ::zip::ZipArchive::new(reader)?;
        Ok(Self { inner })
    }

    /// Number of entries, directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Extracts every entry below `dest`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::PathTraversal` for the first entry whose
    /// name would resolve outside `dest`; nothing is written for that entry
    /// or any later one. I/O and decompression failures abort the same way.
    pub fn extract(&mut self, dest: &DestDir) -> Result<ExtractionReport> {
        let start = Instant::now();
        let mut report = ExtractionReport::new();

        for index in 0..self.inner.len() {
            let mut entry = self.inner.by_index(index)?;
            let entry_type = EntryType::from_is_dir(entry.is_dir());
            let safe_path = SafePath::validate(entry.name(), dest)?;
            let output_path = dest.join(&safe_path);

            match entry_type {
                EntryType::Directory => {
                    debug!(entry = entry.name(), "creating directory");
                    create_directory(&output_path, &mut report)?;
                }
                EntryType::File => {
                    let bytes = extract_file(&mut entry, &output_path, &mut report)?;
                    debug!(entry = entry.name(), bytes, "extracted file");
                }
            }
        }

        report.duration = start.elapsed();
        Ok(report)
    }
}
