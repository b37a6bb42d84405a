//! Client builder for constructing [`ArielClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # Invariants
//! - `base_url` is required and must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - A missing SEC token is allowed; each call may supply a request context instead
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use secrecy::SecretString;

use crate::auth::TokenResolver;
use crate::client::ArielClient;
use crate::error::{ClientError, Result};
use ariel_config::{
    Config,
    constants::{
        DEFAULT_API_VERSION, DEFAULT_MAX_REDIRECTS, DEFAULT_POLL_INTERVAL_SECS,
        DEFAULT_TIMEOUT_SECS,
    },
};

/// Builder for creating a new [`ArielClient`].
///
/// # Example
///
/// ```rust,ignore
/// use ariel_client::ArielClient;
/// use secrecy::SecretString;
///
/// let client = ArielClient::builder()
///     .base_url("https://qradar.example.com".to_string())
///     .auth_token(SecretString::new("sec-token".to_string().into()))
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
pub struct ArielClientBuilder {
    base_url: Option<String>,
    auth_token: Option<SecretString>,
    skip_verify: bool,
    timeout: Duration,
    poll_interval: Duration,
    api_version: String,
}

impl Default for ArielClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_token: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl ArielClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the QRadar console, e.g. `https://qradar.example.com`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the explicit SEC token used for every request.
    pub fn auth_token(mut self, token: SecretString) -> Self {
        self.auth_token = Some(token);
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the per-request HTTP timeout.
    ///
    /// Default is 30 seconds. This is unrelated to the time budget given to
    /// [`ArielClient::poll_until_terminal`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the interval between status checks while waiting for a search.
    ///
    /// Default is 10 seconds. Must be non-zero.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the value of the `Version` request header. Default is `5.1`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.auth_token = config.auth_token.clone();
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.poll_interval = config.connection.poll_interval;
        self.api_version = config.connection.api_version.clone();
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"https://qradar.example.com/"` -> `"https://qradar.example.com"`
    /// - `"https://qradar.example.com//"` -> `"https://qradar.example.com"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`ArielClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided or is empty.
    /// Returns [`ClientError::InvalidConfig`] if the poll interval is zero.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<ArielClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is empty".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(ClientError::InvalidConfig(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if base_url.starts_with("https://") {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;

        Ok(ArielClient {
            http,
            base_url,
            tokens: TokenResolver::new(self.auth_token),
            poll_interval: self.poll_interval,
            api_version: self.api_version,
        })
    }
}
