//! Validated safe path type for archive extraction.

use crate::ExtractionError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// A validated entry path that resolves inside the destination directory.
///
/// `SafePath` is relative and normalized: it contains no `.` or `..`
/// components, no root and no drive prefix.
///
/// # Security Properties
///
/// - Can ONLY be constructed through [`SafePath::validate`]
/// - NO `From<PathBuf>` implementation
/// - `dest.join(&safe)` always has `dest` as a component-wise prefix
///
/// # Examples
///
/// ```no_run
/// use tcfetch_core::types::DestDir;
/// use tcfetch_core::types::SafePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("out")?;
///
/// let safe = SafePath::validate("foo/./bar.txt", &dest)?;
/// assert_eq!(safe.as_path(), std::path::Path::new("foo/bar.txt"));
///
/// assert!(SafePath::validate("../etc/passwd", &dest).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Validates an archive entry name and constructs a `SafePath`.
    ///
    /// Entry names use `/` as separator; `\` is treated as a separator too.
    ///
    /// # Validation Steps
    ///
    /// 1. Reject names containing NUL bytes
    /// 2. Reject absolute names (leading separator or drive prefix)
    /// 3. Reject names whose first segment is `..`
    /// 4. Normalize: drop empty and `.` segments, resolve `..` against the
    ///    segments seen so far; resolving above the root is rejected
    /// 5. Verify the joined path stays within the destination, including
    ///    through any symlinks already present on disk
    ///
    /// An empty normalized name resolves to the destination itself.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::PathTraversal` for any name that fails the
    /// checks above, and `ExtractionError::Io` if an existing ancestor
    /// cannot be canonicalized.
    pub fn validate(name: &str, dest: &DestDir) -> Result<Self> {
        let traversal = || ExtractionError::PathTraversal {
            path: PathBuf::from(name),
        };

        if name.contains('\0') {
            return Err(traversal());
        }

        if name.starts_with(['/', '\\']) {
            return Err(traversal());
        }

        let mut segments: Vec<&str> = Vec::new();
        for (index, segment) in name.split(['/', '\\']).enumerate() {
            match segment {
                "" | "." => {}
                ".." => {
                    if index == 0 || segments.pop().is_none() {
                        return Err(traversal());
                    }
                }
                normal => {
                    // Drive letters and other prefixes parse as non-Normal.
                    let mut components = Path::new(normal).components();
                    match (components.next(), components.next()) {
                        (Some(Component::Normal(_)), None) => segments.push(normal),
                        _ => return Err(traversal()),
                    }
                }
            }
        }

        let normalized: PathBuf = segments.iter().collect();
        let resolved = dest.as_path().join(&normalized);
        if !resolved.starts_with(dest.as_path()) {
            return Err(traversal());
        }

        if let Some(existing) = deepest_existing_ancestor(&resolved, dest.as_path()) {
            let canonical = existing.canonicalize().map_err(|e| {
                ExtractionError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to canonicalize {}: {e}", existing.display()),
                ))
            })?;
            if !canonical.starts_with(dest.as_path()) {
                return Err(traversal());
            }
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

}

/// Finds the deepest of `path` and its ancestors below `root` that exists
/// on disk. Symlinks count as existing even when dangling.
fn deepest_existing_ancestor<'a>(path: &'a Path, root: &Path) -> Option<&'a Path> {
    path.ancestors()
        .take_while(|ancestor| *ancestor != root && ancestor.starts_with(root))
        .find(|ancestor| ancestor.symlink_metadata().is_ok())
}
