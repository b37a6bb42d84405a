//! SEC / CSRF token resolution.
//!
//! Every Ariel request must carry a `SEC` session token. It comes either from
//! an explicit credential held by the client or from the cookies of the inbound
//! request the caller is serving. When a request context is available its
//! `QRadarCSRF` cookie is forwarded as well.
//!
//! # Invariants
//! - A header already present in the caller's [`HeaderSet`] is never overwritten.
//! - A missing `SEC` token is only an error when there is neither a credential
//!   nor a request context. A context without the cookie leaves the header unsent.
//! - Token values are never written to logs; [`HeaderSet`]'s `Debug` redacts them.

use std::collections::HashMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Header (and cookie) carrying the session token.
pub const SEC_HEADER: &str = "SEC";

/// Header (and cookie) carrying the CSRF token.
pub const CSRF_HEADER: &str = "QRadarCSRF";

const REDACTED: &str = "<redacted>";

/// Read-only view of the inbound request a search is being run on behalf of.
pub trait RequestContext: Send + Sync {
    /// Value of the named cookie, if the request carried it.
    fn cookie(&self, name: &str) -> Option<String>;
}

impl RequestContext for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Cookies parsed from an inbound `Cookie:` header.
#[derive(Default, Clone)]
pub struct CookieJar {
    cookies: HashMap<String, String>,
}

impl CookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie:` header value (`name=value; other=value`).
    ///
    /// Malformed pairs (no `=`, empty name) are skipped. Surrounding double
    /// quotes on a value are removed. The first occurrence of a name wins.
    pub fn from_header(header: &str) -> Self {
        let mut jar = Self::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            jar.cookies
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        jar
    }

    /// Add or replace a cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Number of distinct cookie names.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Whether the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl RequestContext for CookieJar {
    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }
}

impl fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.cookies.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("CookieJar").field("names", &names).finish()
    }
}

/// Ordered request headers whose values may be absent.
///
/// Header names are matched case-insensitively. An entry whose value is
/// `None` is kept (so "already present" checks see it) but is not sent.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, Option<String>)>,
}

impl HeaderSet {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`HeaderSet::insert`] with a present value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    /// Insert or replace a header.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Whether a header with this name exists, regardless of its value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }

    /// The value of a header, if present and set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value.as_deref())
    }

    /// Number of entries, including those without a value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no header has been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Headers that will actually be sent, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name.as_str(), v)))
    }

    /// Attach every header with a value to a request.
    pub fn apply(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (name, value) in self.iter() {
            builder = builder.header(name, value);
        }
        builder
    }

    fn is_sensitive(name: &str) -> bool {
        name.eq_ignore_ascii_case(SEC_HEADER) || name.eq_ignore_ascii_case(CSRF_HEADER)
    }
}

impl fmt::Debug for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.entries {
            match value {
                Some(_) if Self::is_sensitive(name) => map.entry(name, &REDACTED),
                Some(v) => map.entry(name, v),
                None => map.entry(name, &None::<&str>),
            };
        }
        map.finish()
    }
}

/// Produces the authentication headers for each outbound request.
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    auth_token: Option<SecretString>,
}

impl TokenResolver {
    /// Create a resolver with an optional explicit SEC token.
    pub fn new(auth_token: Option<SecretString>) -> Self {
        Self { auth_token }
    }

    /// Whether an explicit SEC token was supplied at construction.
    pub fn has_credential(&self) -> bool {
        self.auth_token.is_some()
    }

    /// Add the `SEC` and `QRadarCSRF` headers to `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] when `headers` has no `SEC` entry,
    /// no explicit token was configured and no request context was given.
    pub fn get_tokens(
        &self,
        headers: Option<HeaderSet>,
        context: Option<&dyn RequestContext>,
    ) -> Result<HeaderSet> {
        let mut headers = headers.unwrap_or_default();

        if !headers.contains(SEC_HEADER) {
            let sec = match (&self.auth_token, context) {
                (Some(token), _) => Some(token.expose_secret().to_string()),
                (None, Some(ctx)) => ctx.cookie(SEC_HEADER),
                (None, None) => {
                    return Err(ClientError::AuthFailed(
                        "Unable to acquire any SEC token".to_string(),
                    ));
                }
            };
            headers.insert(SEC_HEADER, sec);
        }

        if let Some(ctx) = context
            && !headers.contains(CSRF_HEADER)
        {
            headers.insert(CSRF_HEADER, ctx.cookie(CSRF_HEADER));
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with_token(token: &str) -> TokenResolver {
        TokenResolver::new(Some(SecretString::new(token.to_string().into())))
    }

    #[test]
    fn test_explicit_token_without_context() {
        let headers = resolver_with_token("l_o_n_g_w_a_v_e")
            .get_tokens(None, None)
            .unwrap();
        assert_eq!(headers.get(SEC_HEADER), Some("l_o_n_g_w_a_v_e"));
        assert!(!headers.contains(CSRF_HEADER));
    }

    #[test]
    fn test_no_token_and_no_context_fails() {
        let err = TokenResolver::default().get_tokens(None, None).unwrap_err();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("Unable to acquire any SEC token"));
    }

    #[test]
    fn test_tokens_from_cookies() {
        let jar = CookieJar::from_header("SEC=cookie-sec; QRadarCSRF=cookie-csrf");
        let headers = TokenResolver::default()
            .get_tokens(None, Some(&jar))
            .unwrap();
        assert_eq!(headers.get(SEC_HEADER), Some("cookie-sec"));
        assert_eq!(headers.get(CSRF_HEADER), Some("cookie-csrf"));
    }

    #[test]
    fn test_explicit_token_wins_over_cookie() {
        let jar = CookieJar::new()
            .with_cookie(SEC_HEADER, "cookie-sec")
            .with_cookie(CSRF_HEADER, "cookie-csrf");
        let headers = resolver_with_token("explicit")
            .get_tokens(None, Some(&jar))
            .unwrap();
        assert_eq!(headers.get(SEC_HEADER), Some("explicit"));
        assert_eq!(headers.get(CSRF_HEADER), Some("cookie-csrf"));
    }

    #[test]
    fn test_missing_csrf_cookie_is_not_an_error() {
        let jar = CookieJar::new().with_cookie(SEC_HEADER, "cookie-sec");
        let headers = TokenResolver::default()
            .get_tokens(None, Some(&jar))
            .unwrap();
        assert!(headers.contains(CSRF_HEADER));
        assert_eq!(headers.get(CSRF_HEADER), None);
        assert_eq!(headers.iter().count(), 1);
    }

    #[test]
    fn test_context_without_sec_cookie_yields_empty_value() {
        let jar = CookieJar::new();
        let headers = TokenResolver::default()
            .get_tokens(None, Some(&jar))
            .unwrap();
        assert!(headers.contains(SEC_HEADER));
        assert_eq!(headers.get(SEC_HEADER), None);
    }

    #[test]
    fn test_existing_headers_are_preserved() {
        let preset = HeaderSet::new()
            .with("sec", "caller-sec")
            .with(CSRF_HEADER, "caller-csrf")
            .with("Accept", "application/json");
        let mut ctx = HashMap::new();
        ctx.insert(SEC_HEADER.to_string(), "cookie-sec".to_string());
        ctx.insert(CSRF_HEADER.to_string(), "cookie-csrf".to_string());

        let headers = resolver_with_token("explicit")
            .get_tokens(Some(preset), Some(&ctx))
            .unwrap();
        assert_eq!(headers.get(SEC_HEADER), Some("caller-sec"));
        assert_eq!(headers.get(CSRF_HEADER), Some("caller-csrf"));
        assert_eq!(headers.get("accept"), Some("application/json"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_preset_sec_header_skips_auth_failure() {
        let preset = HeaderSet::new().with(SEC_HEADER, "caller-sec");
        let headers = TokenResolver::default()
            .get_tokens(Some(preset), None)
            .unwrap();
        assert_eq!(headers.get(SEC_HEADER), Some("caller-sec"));
    }

    #[test]
    fn test_header_set_debug_redacts_tokens() {
        let headers = HeaderSet::new()
            .with(SEC_HEADER, "super-secret")
            .with(CSRF_HEADER, "csrf-secret")
            .with("Version", "5.1");
        let rendered = format!("{:?}", headers);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("csrf-secret"));
        assert!(rendered.contains("5.1"));
        assert!(rendered.contains(REDACTED));
    }

    #[test]
    fn test_cookie_header_parsing() {
        let jar = CookieJar::from_header(" SEC = abc ; junk; =nameless; QRadarCSRF=\"quoted\"; SEC=second");
        assert_eq!(jar.len(), 2);
        assert_eq!(jar.cookie(SEC_HEADER), Some("abc".to_string()));
        assert_eq!(jar.cookie(CSRF_HEADER), Some("quoted".to_string()));
        assert!(!format!("{:?}", jar).contains("abc"));
    }

    #[test]
    fn test_insert_replaces_case_insensitively() {
        let mut headers = HeaderSet::new().with("Range", "items=0-5");
        headers.insert("range", Some("items=0-9".to_string()));
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("RANGE"), Some("items=0-9"));
    }

    #[test]
    fn test_valueless_entries_count_but_are_not_sent() {
        let mut headers = HeaderSet::new();
        assert!(headers.is_empty());
        headers.insert(CSRF_HEADER, None);
        assert_eq!(headers.len(), 1);
        assert!(!headers.is_empty());
        assert_eq!(headers.iter().count(), 0);

        assert!(CookieJar::from_header("no-equals; =empty-name").is_empty());
    }
}
