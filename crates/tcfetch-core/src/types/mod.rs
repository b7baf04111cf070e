//! Type-safe wrappers for archive extraction.
//!
//! A [`SafePath`] can only be obtained by validating an archive entry name
//! against a [`DestDir`], so code that writes files never sees an unchecked
//! entry name.

pub mod dest_dir;
pub mod entry_type;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use entry_type::EntryType;
pub use safe_path::SafePath;
