//! Core configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Public GoRest v2 endpoint
pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2";

/// Environment label used when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "QA";

/// Target environment for a test run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for authenticated calls
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Environment label (QA, staging, ...)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_token: None,
            environment: default_environment(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EnvConfig {
    /// Set the bearer token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The bearer token, or `MissingValue` when it is absent or blank.
    pub fn require_auth_token(&self) -> Result<&str> {
        require_token(self.auth_token.as_deref())
    }
}

/// The trimmed bearer token; absent or blank is [`ConfigError::MissingValue`]
pub fn require_token(token: Option<&str>) -> Result<&str> {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ConfigError::MissingValue("auth_token")),
    }
}

/// Something that can produce a validated [`EnvConfig`]
pub trait ConfigLoader {
    /// Load configuration from all sources
    fn load_config(&self) -> Result<EnvConfig>;
    /// Validate a loaded configuration
    fn validate_config(&self, config: &EnvConfig) -> Result<()>;
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.environment, "QA");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_require_auth_token() {
        let config = EnvConfig::default().with_auth_token("abc123");
        assert_eq!(config.require_auth_token().unwrap(), "abc123");
    }

    #[test]
    fn test_missing_auth_token() {
        let config = EnvConfig::default();
        assert!(matches!(
            config.require_auth_token(),
            Err(ConfigError::MissingValue("auth_token"))
        ));
    }

    #[test]
    fn test_blank_auth_token_is_missing() {
        let config = EnvConfig::default().with_auth_token("   ");
        assert!(config.require_auth_token().is_err());
    }

    #[test]
    fn test_require_token_trims() {
        assert_eq!(require_token(Some("  abc123 \n")).unwrap(), "abc123");
        assert!(matches!(
            require_token(Some("")),
            Err(ConfigError::MissingValue("auth_token"))
        ));
    }
}
