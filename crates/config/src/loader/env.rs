//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse environment variables for console connection settings.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - `ARIEL_BASE_URL` wins over `QRADAR_CONSOLE_FQDN` when both are set.
//! - Invalid numeric or boolean values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_secs(var: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be a number of seconds".to_string(),
        })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("ARIEL_BASE_URL") {
        loader.set_base_url(Some(url));
    } else if let Some(fqdn) = env_var_or_none("QRADAR_CONSOLE_FQDN") {
        loader.set_base_url(Some(format!("https://{}", fqdn)));
    }
    if let Some(token) = env_var_or_none("ARIEL_AUTH_TOKEN") {
        loader.set_auth_token(Some(SecretString::new(token.into())));
    }
    if let Some(skip) = env_var_or_none("ARIEL_SKIP_VERIFY") {
        loader.set_skip_verify(Some(skip.parse().map_err(|_| {
            ConfigError::InvalidValue {
                var: "ARIEL_SKIP_VERIFY".to_string(),
                message: "must be true or false".to_string(),
            }
        })?));
    }
    if let Some(timeout) = env_var_or_none("ARIEL_TIMEOUT") {
        loader.set_timeout(Some(parse_secs("ARIEL_TIMEOUT", &timeout)?));
    }
    if let Some(interval) = env_var_or_none("ARIEL_POLL_INTERVAL") {
        loader.set_poll_interval(Some(parse_secs("ARIEL_POLL_INTERVAL", &interval)?));
    }
    if let Some(version) = env_var_or_none("ARIEL_API_VERSION") {
        loader.set_api_version(Some(version));
    }
    Ok(())
}
