//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Ariel client.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Clients built here poll every few milliseconds so lifecycle tests stay fast
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::time::Duration;

#[allow(unused_imports)]
pub use ariel_client::testing::{FIXTURE_SEARCH_ID, load_fixture};

#[allow(unused_imports)]
pub use ariel_client::{
    ArielClient, ClientError, CookieJar, ResultRange, SearchStatus, endpoints::SEARCHES_PATH,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// SEC token configured on clients built with [`client_with_token`].
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-sec-token";

/// Poll interval used by test clients.
#[allow(dead_code)]
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Build a client pointed at `server` with an explicit SEC token.
#[allow(dead_code)]
pub fn client_with_token(server: &MockServer) -> ArielClient {
    ArielClient::builder()
        .base_url(server.uri())
        .auth_token(secrecy::SecretString::new(TEST_TOKEN.to_string().into()))
        .poll_interval(TEST_POLL_INTERVAL)
        .build()
        .expect("client should build")
}

/// Build a client pointed at `server` that relies on request contexts for tokens.
#[allow(dead_code)]
pub fn client_without_token(server: &MockServer) -> ArielClient {
    ArielClient::builder()
        .base_url(server.uri())
        .poll_interval(TEST_POLL_INTERVAL)
        .build()
        .expect("client should build")
}

/// Path of a single search resource.
#[allow(dead_code)]
pub fn search_path(search_id: &str) -> String {
    format!("/{}/{}", SEARCHES_PATH, search_id)
}
