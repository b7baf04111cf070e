//! Archive format implementations.

pub(crate) mod common;
pub mod zip;

pub use self::zip::ZipArchive;
