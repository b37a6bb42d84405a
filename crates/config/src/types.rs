//! Connection configuration types for the Ariel client.
//!
//! Responsibilities:
//! - Define connection settings (URL, TLS verification, timeouts, polling cadence).
//! - Define the main `Config` structure combining connection and the optional credential.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - Duration fields are serialized as seconds (integers).
//! - Default values come from [`crate::constants`], not magic numbers.

use crate::constants::{
    DEFAULT_API_VERSION, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for a QRadar console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the console (e.g., `https://qradar.example.com`).
    pub base_url: String,
    /// Whether to skip TLS certificate verification.
    pub skip_verify: bool,
    /// Per-request HTTP timeout.
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Interval between search status checks.
    #[serde(with = "duration_seconds")]
    pub poll_interval: Duration,
    /// Value of the `Version` request header.
    pub api_version: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost".to_string(),
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// Main configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connection: ConnectionConfig,
    /// Explicit SEC token. When absent, tokens must come from an inbound request context.
    pub auth_token: Option<SecretString>,
}

impl Config {
    /// Create a configuration for the given base URL with an explicit SEC token.
    pub fn with_auth_token(base_url: String, token: SecretString) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..Default::default()
            },
            auth_token: Some(token),
        }
    }
}
