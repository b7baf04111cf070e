//! File and URL layout for one build's artifacts.

use std::path::Path;
use std::path::PathBuf;

use crate::config::Config;
use crate::config::ConfigError;

/// Paths and URL derived from a build id and an output directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tcfetch_core::BuildLayout;
/// use tcfetch_core::Config;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let layout = BuildLayout::new("42", "out")?;
/// assert_eq!(layout.archive_path(), Path::new("out/build-42-artifacts.zip"));
/// assert_eq!(layout.extract_dir(), Path::new("out/build-42"));
///
/// let config = Config::new("https://ci.example.com", "t");
/// assert_eq!(
///     layout.artifacts_url(&config),
///     "https://ci.example.com/app/rest/builds/id:42/artifacts/archived"
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    build_id: String,
    archive_path: PathBuf,
    extract_dir: PathBuf,
}

impl BuildLayout {
    /// Derives the layout for `build_id` under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the build id is empty or contains characters
    /// that would change the request path or escape `output_dir`.
    pub fn new(build_id: &str, output_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        validate_build_id(build_id)?;
        let output_dir = output_dir.as_ref();

        Ok(Self {
            build_id: build_id.to_string(),
            archive_path: output_dir.join(format!("build-{build_id}-artifacts.zip")),
            extract_dir: output_dir.join(format!("build-{build_id}")),
        })
    }

    /// The build id.
    #[must_use]
    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    /// Where the downloaded archive is stored.
    #[must_use]
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Where the archive contents are extracted.
    #[must_use]
    pub fn extract_dir(&self) -> &Path {
        &self.extract_dir
    }

    /// REST endpoint serving all artifacts of the build as one ZIP.
    #[must_use]
    pub fn artifacts_url(&self, config: &Config) -> String {
        format!(
            "{}/app/rest/builds/id:{}/artifacts/archived",
            config.base_url(),
            self.build_id
        )
    }
}

fn validate_build_id(build_id: &str) -> Result<(), ConfigError> {
    if build_id.is_empty() {
        return Err(ConfigError::EmptyBuildId);
    }

    let forbidden = |c: char| {
        c.is_whitespace() || c.is_control() || matches!(c, '/' | '\\' | '?' | '#' | '%')
    };
    if build_id.contains(forbidden) || build_id == "." || build_id == ".." {
        return Err(ConfigError::InvalidBuildId(build_id.to_string()));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = BuildLayout::new("123", "/tmp/out").unwrap();
        assert_eq!(layout.build_id(), "123");
        assert_eq!(
            layout.archive_path(),
            Path::new("/tmp/out/build-123-artifacts.zip")
        );
        assert_eq!(layout.extract_dir(), Path::new("/tmp/out/build-123"));
    }

    #[test]
    fn test_layout_current_dir() {
        let layout = BuildLayout::new("7", ".").unwrap();
        assert_eq!(layout.archive_path(), Path::new("./build-7-artifacts.zip"));
    }

    #[test]
    fn test_artifacts_url() {
        let layout = BuildLayout::new("9876", ".").unwrap();
        let config = Config::new("https://teamcity.example.com/", "t");
        assert_eq!(
            layout.artifacts_url(&config),
            "https://teamcity.example.com/app/rest/builds/id:9876/artifacts/archived"
        );
    }

    #[test]
    fn test_empty_build_id() {
        assert_eq!(
            BuildLayout::new("", ".").unwrap_err(),
            ConfigError::EmptyBuildId
        );
    }

    #[test]
    fn test_rejects_path_like_build_ids() {
        for id in ["../1", "a/b", "a\\b", "1?x=2", "1#frag", "1 2", "..", "1%2F"] {
            assert!(
                matches!(
                    BuildLayout::new(id, "."),
                    Err(ConfigError::InvalidBuildId(_))
                ),
                "build id should be rejected: {id}"
            );
        }
    }
}
