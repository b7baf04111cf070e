//! Archive entry type enumeration.

/// Type of entry in an artifact archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,
}

impl EntryType {
    /// Classifies a ZIP entry by its directory flag.
    #[must_use]
    pub const fn from_is_dir(is_dir: bool) -> Self {
        if is_dir { Self::Directory } else { Self::File }
    }
}
