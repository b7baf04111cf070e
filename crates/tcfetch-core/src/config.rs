//! Connection configuration read from the environment.

use std::time::Duration;
use thiserror::Error;

/// Server used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://teamcity.cockroachdb.com";

/// Overall deadline for one artifact download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Environment variables holding the bearer token, in lookup order.
pub const TOKEN_VARS: [&str; 2] = ["TEAMCITY_TOKEN", "TOKEN"];

/// Environment variables holding the server base URL, in lookup order.
pub const BASE_URL_VARS: [&str; 2] = ["TEAMCITY_URL", "BASE_URL"];

/// Errors raised while assembling the configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No bearer token in the environment.
    #[error("TEAMCITY_TOKEN environment variable not set")]
    MissingToken,

    /// Build id argument was empty.
    #[error("build id must not be empty")]
    EmptyBuildId,

    /// Build id contains characters that would alter the URL or file names.
    #[error("invalid build id: {0:?}")]
    InvalidBuildId(String),
}

/// Server location, credential and transfer limits.
///
/// # Examples
///
/// ```
/// use tcfetch_core::Config;
///
/// let config = Config::new("https://ci.example.com//", "secret");
/// assert_eq!(config.base_url(), "https://ci.example.com");
/// ```
#[derive(Clone)]
pub struct Config {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl Config {
    /// Creates a configuration from explicit values.
    ///
    /// Trailing slashes of `base_url` are trimmed.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if neither `TEAMCITY_TOKEN` nor
    /// `TOKEN` holds a non-empty value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if no token variable is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .find(|value| !value.is_empty())
        };

        let token = first_set(&TOKEN_VARS).ok_or(ConfigError::MissingToken)?;
        let base_url = first_set(&BASE_URL_VARS).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(base_url, token))
    }

    /// Overrides the overall download deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Server base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Overall download deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token() {
        let result = Config::from_lookup(lookup(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingToken);
    }

    #[test]
    fn test_empty_token_is_missing() {
        let result = Config::from_lookup(lookup(&[("TEAMCITY_TOKEN", "")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingToken);
    }

    #[test]
    fn test_default_base_url() {
        let config = Config::from_lookup(lookup(&[("TEAMCITY_TOKEN", "abc")])).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.token(), "abc");
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_short_variable_names() {
        let config = Config::from_lookup(lookup(&[
            ("TOKEN", "short"),
            ("BASE_URL", "http://localhost:8111/"),
        ]))
        .unwrap();
        assert_eq!(config.token(), "short");
        assert_eq!(config.base_url(), "http://localhost:8111");
    }

    #[test]
    fn test_prefixed_variables_win() {
        let config = Config::from_lookup(lookup(&[
            ("TEAMCITY_TOKEN", "long"),
            ("TOKEN", "short"),
            ("TEAMCITY_URL", "https://a.example"),
            ("BASE_URL", "https://b.example"),
        ]))
        .unwrap();
        assert_eq!(config.token(), "long");
        assert_eq!(config.base_url(), "https://a.example");
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let config = Config::new("https://ci.example.com///", "t");
        assert_eq!(config.base_url(), "https://ci.example.com");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new("https://ci.example.com", "super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_with_timeout() {
        let config = Config::new("http://x", "t").with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
