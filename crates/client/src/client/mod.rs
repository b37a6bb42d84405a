//! Ariel REST API client.
//!
//! This module provides the primary [`ArielClient`] for running Ariel
//! searches against a QRadar console.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `search`: The search lifecycle (submit, status, wait, results)
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - SEC/CSRF header construction (delegated to [`crate::auth::TokenResolver`])
//!
//! # Invariants
//! - Tokens are resolved before every outbound call; nothing is cached between calls.
//! - The client holds no per-search state. Search handles live on the service.

pub mod builder;
mod search;

use std::time::Duration;

use crate::auth::{HeaderSet, RequestContext, TokenResolver};
use crate::error::Result;

/// Ariel REST API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use ariel_client::ArielClient;
/// use secrecy::SecretString;
///
/// let client = ArielClient::builder()
///     .base_url("https://qradar.example.com".to_string())
///     .auth_token(SecretString::new("sec-token".to_string().into()))
///     .build()?;
/// ```
///
/// # Authentication
///
/// Every request carries a `SEC` header. It comes from the token given to the
/// builder, or, when none was given, from the `SEC` cookie of the request
/// context passed to each call. A context also contributes its `QRadarCSRF`
/// cookie.
#[derive(Debug)]
pub struct ArielClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) tokens: TokenResolver,
    pub(crate) poll_interval: Duration,
    pub(crate) api_version: String,
}

impl ArielClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ArielClientBuilder {
        builder::ArielClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Interval between status checks while waiting for a search.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Whether an explicit SEC token was configured.
    pub fn has_auth_token(&self) -> bool {
        self.tokens.has_credential()
    }

    /// Fixed headers for every Ariel request, plus the resolved tokens.
    pub(crate) fn request_headers(&self, context: Option<&dyn RequestContext>) -> Result<HeaderSet> {
        let base = HeaderSet::new()
            .with("Accept", "application/json")
            .with("Content-Type", "application/json")
            .with("Version", self.api_version.as_str());
        self.tokens.get_tokens(Some(base), context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CSRF_HEADER, CookieJar, SEC_HEADER};
    use crate::error::ClientError;
    use secrecy::SecretString;

    fn client(token: Option<&str>) -> ArielClient {
        let mut builder = ArielClient::builder().base_url("https://qradar.example.com".to_string());
        if let Some(token) = token {
            builder = builder.auth_token(SecretString::new(token.to_string().into()));
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_request_headers_include_fixed_headers() {
        let headers = client(Some("tok")).request_headers(None).unwrap();
        assert_eq!(headers.get("Accept"), Some("application/json"));
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.get("Version"), Some("5.1"));
        assert_eq!(headers.get(SEC_HEADER), Some("tok"));
        assert!(!headers.contains(CSRF_HEADER));
    }

    #[test]
    fn test_request_headers_from_context() {
        let jar = CookieJar::from_header("SEC=from-cookie; QRadarCSRF=csrf");
        let headers = client(None).request_headers(Some(&jar)).unwrap();
        assert_eq!(headers.get(SEC_HEADER), Some("from-cookie"));
        assert_eq!(headers.get(CSRF_HEADER), Some("csrf"));
    }

    #[test]
    fn test_request_headers_without_any_token() {
        let err = client(None).request_headers(None).unwrap_err();
        assert!(matches!(err, ClientError::AuthFailed(_)));
    }

    #[test]
    fn test_has_auth_token() {
        assert!(client(Some("tok")).has_auth_token());
        assert!(!client(None).has_auth_token());
    }
}
