//! Ariel search endpoints and the polling state machine.
//!
//! # What this module handles:
//! - Submitting a search (`POST api/ariel/searches`)
//! - Reading a search's status (`GET api/ariel/searches/{id}`)
//! - Waiting for a search to reach a terminal status
//! - Retrieving search results (`GET api/ariel/searches/{id}/results`)
//!
//! # What this module does NOT handle:
//! - SEC/CSRF token resolution (see [`crate::auth`])
//! - Range validation (see [`crate::models::ResultRange`])
//!
//! # Invariants
//! - A submission succeeds only on HTTP 201; status and results only on HTTP 200.
//! - Only submission failures try to read a JSON `message` from the error body.
//! - HTTP failures are never retried; only non-terminal statuses are re-polled.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method};
use tokio::time::Instant;
use tracing::{debug, error};

use crate::auth::HeaderSet;
use crate::endpoints::encode_path_segment;
use crate::endpoints::request::{ApiResponse, send_request};
use crate::error::{ClientError, Result};
use crate::models::{CompletedSearch, ResultRange, SearchCreated, SearchProgress, SearchStatus};

/// Base path of the Ariel searches collection, relative to the console URL.
pub const SEARCHES_PATH: &str = "api/ariel/searches";

const CREATE_FIELDS: &str = "status,search_id";
const STATUS_FIELDS: &str = "status,record_count";

fn search_url(base_url: &str, search_id: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url,
        SEARCHES_PATH,
        encode_path_segment(search_id)
    )
}

/// Pick the message to report for a rejected submission.
///
/// Uses the JSON body's `message` field when the body is a JSON object that
/// has one; otherwise the raw body. Parse failures never hide the body.
fn submission_error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("message") {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

fn lifecycle_error(search_id: &str, response: &ApiResponse) -> ClientError {
    ClientError::Search {
        expression: None,
        handle: Some(search_id.to_string()),
        message: format!("search {} failed; {}", search_id, response.body),
    }
}

/// Submit an AQL query.
///
/// Returns the status and handle reported by the service, which need not be `WAIT`.
pub async fn create_search(
    client: &Client,
    base_url: &str,
    headers: &HeaderSet,
    query: &str,
) -> Result<SearchCreated> {
    debug!("Creating Ariel search: {}", query);

    let url = format!("{}/{}", base_url, SEARCHES_PATH);
    let params = [("query_expression", query), ("fields", CREATE_FIELDS)];

    let response = send_request(client, Method::POST, &url, headers, &params).await?;

    if response.status != 201 {
        error!(
            status = response.status,
            query = %query,
            body = %response.body,
            "Failed to start Ariel search"
        );
        return Err(ClientError::Search {
            expression: Some(query.to_string()),
            handle: None,
            message: submission_error_message(&response.body),
        });
    }

    let created: SearchCreated = response.json()?;
    debug!(search_id = %created.search_id, status = %created.status, "Search created");
    Ok(created)
}

/// Get the status and record count of a search.
pub async fn get_search_status(
    client: &Client,
    base_url: &str,
    headers: &HeaderSet,
    search_id: &str,
) -> Result<SearchProgress> {
    debug!("Getting status for search: {}", search_id);

    let url = search_url(base_url, search_id);
    let params = [("fields", STATUS_FIELDS)];

    let response = send_request(client, Method::GET, &url, headers, &params).await?;

    if response.status != 200 {
        return Err(lifecycle_error(search_id, &response));
    }

    response.json()
}

/// Poll `check_status` until the search reaches a terminal status or the
/// deadline `started_at + timeout` passes.
///
/// Each round checks the status first and only then compares against the
/// deadline, so a zero timeout still performs exactly one check.
/// `CANCELED`/`ERROR` end the wait immediately regardless of time left.
pub async fn wait_for_search<F, Fut>(
    query: &str,
    search_id: &str,
    started_at: Instant,
    timeout: Duration,
    poll_interval: Duration,
    mut check_status: F,
) -> Result<CompletedSearch>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<SearchProgress>>,
{
    let deadline = started_at.checked_add(timeout);

    loop {
        let progress = check_status().await?;

        match progress.status {
            SearchStatus::Completed => {
                debug!(search_id = %search_id, record_count = progress.record_count, "Search completed");
                return Ok(CompletedSearch {
                    search_id: search_id.to_string(),
                    record_count: progress.record_count,
                });
            }
            SearchStatus::Canceled | SearchStatus::Error => {
                return Err(ClientError::Search {
                    expression: Some(query.to_string()),
                    handle: Some(search_id.to_string()),
                    message: format!("search {} failed; {}", search_id, progress.status),
                });
            }
            SearchStatus::NonTerminal(ref status) => {
                if deadline.is_none_or(|d| Instant::now() < d) {
                    debug!(search_id = %search_id, status = %status, "Search still running");
                    tokio::time::sleep(poll_interval).await;
                    continue;
                }
                return Err(ClientError::Search {
                    expression: Some(query.to_string()),
                    handle: Some(search_id.to_string()),
                    message: format!(
                        "search {} did not complete within {}s!",
                        search_id,
                        timeout.as_secs()
                    ),
                });
            }
        }
    }
}

/// Get the results of a search as an uninterpreted JSON document.
pub async fn get_search_results(
    client: &Client,
    base_url: &str,
    headers: &HeaderSet,
    search_id: &str,
    range: ResultRange,
) -> Result<serde_json::Value> {
    debug!("Getting results for search: {} ({:?})", search_id, range);

    let url = format!("{}/results", search_url(base_url, search_id));

    let mut headers = headers.clone();
    if let Some(value) = range.header_value() {
        headers.insert("Range", Some(value));
    }

    let response = send_request(client, Method::GET, &url, &headers, &[]).await?;

    if response.status != 200 {
        return Err(lifecycle_error(search_id, &response));
    }

    response.json()
}
