//! Single-shot HTTP request execution with request/response logging.
//!
//! The search lifecycle classifies outcomes by exact status code (201 for a
//! submission, 200 otherwise), so this layer never turns a status into an
//! error and never retries. It only reports transport failures.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::HeaderSet;
use crate::error::{ClientError, Result};

/// Status code and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidResponse`] if the body is not valid JSON
    /// or does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            ClientError::InvalidResponse(format!(
                "Failed to parse response (status {}): {}",
                self.status, e
            ))
        })
    }
}

/// Send one request and read the whole body.
///
/// # Errors
///
/// Returns [`ClientError::HttpError`] on connection, TLS, timeout or
/// body-read failures.
pub async fn send_request(
    client: &Client,
    method: Method,
    url: &str,
    headers: &HeaderSet,
    params: &[(&str, &str)],
) -> Result<ApiResponse> {
    debug!(method = %method, url = %url, headers = ?headers, params = ?params, "REQUEST");

    let mut builder = headers.apply(client.request(method, url));
    if !params.is_empty() {
        builder = builder.query(params);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    debug!(status, body = %body, "RESPONSE");

    Ok(ApiResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Body {
        value: u32,
    }

    #[test]
    fn test_json_decodes_body() {
        let response = ApiResponse {
            status: 200,
            body: r#"{"value": 7}"#.to_string(),
        };
        assert_eq!(response.json::<Body>().unwrap().value, 7);
    }

    #[test]
    fn test_json_reports_invalid_response() {
        let response = ApiResponse {
            status: 200,
            body: "<html>".to_string(),
        };
        let err = response.json::<Body>().unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(err.to_string().contains("status 200"));
    }
}
