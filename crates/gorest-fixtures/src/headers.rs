//! Request header sets

use gorest_config::{require_token, ConfigError, EnvConfig, Result};
use gorest_http::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

/// Builds authenticated and public JSON header sets
#[derive(Debug, Clone, Default)]
pub struct HeaderProvider {
    auth_token: Option<String>,
}

impl HeaderProvider {
    /// Create a provider for an optional bearer token
    pub fn new(auth_token: Option<String>) -> Self {
        Self { auth_token }
    }

    /// Create a provider from loaded configuration
    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.auth_token.clone())
    }

    /// JSON headers plus `Authorization: Bearer <token>`.
    ///
    /// Fails with [`ConfigError::MissingValue`] when no token is configured.
    pub fn authenticated_headers(&self) -> Result<HeaderMap> {
        let token = require_token(self.auth_token.as_deref())?;

        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            ConfigError::Validation(format!("Auth token is not a valid header value: {e}"))
        })?;
        value.set_sensitive(true);

        let mut headers = self.public_headers();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// JSON `Content-Type` and `Accept` only
    pub fn public_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}
