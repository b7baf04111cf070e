//! Fetch TeamCity build artifact archives and extract them safely.
//!
//! `tcfetch-core` downloads the "all artifacts" ZIP of a build with a bearer
//! token and unpacks it into a directory. Every archive entry is checked
//! against the destination before anything is written, so a crafted entry
//! such as `../../etc/passwd` aborts the extraction instead of escaping it.
//!
//! # Examples
//!
//! ```no_run
//! use tcfetch_core::BuildLayout;
//! use tcfetch_core::Config;
//! use tcfetch_core::Fetcher;
//! use tcfetch_core::NoopProgress;
//! use tcfetch_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let layout = BuildLayout::new("12345", "out")?;
//!
//! let fetcher = Fetcher::new(&config)?;
//! fetcher.fetch_to_file(&layout.artifacts_url(&config), layout.archive_path(), &mut NoopProgress)?;
//!
//! let report = extract_archive(layout.archive_path(), layout.extract_dir())?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod layout;
pub mod report;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::count_files;
pub use api::extract_archive;
pub use config::Config;
pub use config::ConfigError;
pub use error::ExtractionError;
pub use error::FetchError;
pub use error::Result;
pub use fetch::Fetcher;
pub use layout::BuildLayout;
pub use report::ExtractionReport;
pub use report::FetchReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

pub use types::DestDir;
pub use types::EntryType;
pub use types::SafePath;
