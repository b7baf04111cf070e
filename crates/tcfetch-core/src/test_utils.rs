//! Test utilities for archive creation.
//!
//! This module provides reusable helpers for building in-memory ZIP archives,
//! shared by the unit tests, the integration tests and the CLI tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Creates an in-memory ZIP archive from `(name, content)` pairs.
///
/// Files are stored uncompressed with mode 0o644. Names are written as
/// given, so traversal names like `../x` end up in the archive verbatim.
///
/// # Examples
///
/// ```
/// use tcfetch_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("file.txt", "hello"), ("dir/nested.txt", "world")]);
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (name, data)| {
            builder.add_file(name, data.as_bytes())
        })
        .build()
}

/// Builder for ZIP test archives with file and directory entries.
///
/// # Examples
///
/// ```
/// use tcfetch_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("a.txt", b"hello")
///     .add_directory("sub/empty/")
///     .build();
/// ```
pub struct ZipTestBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ZipTestBuilder {
    /// Creates a builder that stores entries uncompressed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(CompressionMethod::Stored)
                .unix_permissions(0o644),
        }
    }

    /// Deflate subsequently added files.
    #[must_use]
    pub fn deflated(mut self) -> Self {
        self.options = self
            .options
            .compression_method(CompressionMethod::Deflated);
        self
    }

    /// Adds a file entry.
    #[must_use]
    pub fn add_file(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.writer.start_file(name, self.options).unwrap();
        self.writer.write_all(data.as_ref()).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        self.writer
            .add_directory(name, self.options.unix_permissions(0o755))
            .unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
