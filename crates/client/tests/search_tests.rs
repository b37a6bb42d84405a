//! Search submission and status endpoint tests.
//!
//! This module tests the first two steps of the search lifecycle:
//! - Submitting a query and reading the returned handle
//! - Reporting rejected submissions with the service's message
//! - Reading a search's status and record count
//!
//! # Invariants
//! - A submission succeeds only on HTTP 201
//! - A status request succeeds only on HTTP 200
//! - Only submission errors look inside the body for a `message` field
//!
//! # What this does NOT handle
//! - Waiting for completion (see poll_tests.rs)
//! - Fetching results (see results_tests.rs)

mod common;

use common::*;
use wiremock::matchers::{header, method, path, query_param};

const QUERY: &str = "SELECT username, COUNT(*) FROM events GROUP BY username LAST 1 HOURS";

#[tokio::test]
async fn test_submit_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}", SEARCHES_PATH)))
        .and(query_param("query_expression", QUERY))
        .and(query_param("fields", "status,search_id"))
        .and(header("SEC", TEST_TOKEN))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header("Version", "5.1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(load_fixture("search/create_wait.json")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token(&mock_server);
    let created = client.submit(QUERY, None).await.unwrap();

    assert_eq!(created.search_id, FIXTURE_SEARCH_ID);
    assert_eq!(created.status, SearchStatus::NonTerminal("WAIT".to_string()));
}

#[tokio::test]
async fn test_submit_reports_any_initial_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}", SEARCHES_PATH)))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "status": "COMPLETED",
            "search_id": "cached-search"
        })))
        .mount(&mock_server)
        .await;

    let created = client_with_token(&mock_server)
        .submit(QUERY, None)
        .await
        .unwrap();

    assert_eq!(created.status, SearchStatus::Completed);
    assert_eq!(created.search_id, "cached-search");
}

#[tokio::test]
async fn test_submit_200_is_not_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}", SEARCHES_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(load_fixture("search/create_wait.json")))
        .mount(&mock_server)
        .await;

    let err = client_with_token(&mock_server)
        .submit(QUERY, None)
        .await
        .unwrap_err();

    assert!(err.is_search_error());
    assert_eq!(err.search_expression(), Some(QUERY));
    assert_eq!(err.search_handle(), None);
}

#[tokio::test]
async fn test_submit_failure_uses_json_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}", SEARCHES_PATH)))
        .respond_with(ResponseTemplate::new(422).set_body_json(load_fixture("search/create_error.json")))
        .mount(&mock_server)
        .await;

    let err = client_with_token(&mock_server)
        .submit("SELECT * FORM events", None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid AQL query: unexpected token 'form'");
    assert_eq!(err.search_expression(), Some("SELECT * FORM events"));
}

#[tokio::test]
async fn test_submit_failure_falls_back_to_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}", SEARCHES_PATH)))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let err = client_with_token(&mock_server)
        .submit(QUERY, None)
        .await
        .unwrap_err();

    assert!(err.is_search_error());
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[tokio::test]
async fn test_submit_success_with_unexpected_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/{}", SEARCHES_PATH)))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"status": "WAIT"})))
        .mount(&mock_server)
        .await;

    let err = client_with_token(&mock_server)
        .submit(QUERY, None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_get_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(search_path(FIXTURE_SEARCH_ID)))
        .and(query_param("fields", "status,record_count"))
        .and(header("SEC", TEST_TOKEN))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/status_completed.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let progress = client_with_token(&mock_server)
        .status(FIXTURE_SEARCH_ID, None)
        .await
        .unwrap();

    assert_eq!(progress.status, SearchStatus::Completed);
    assert_eq!(progress.record_count, 1);
}

#[tokio::test]
async fn test_get_status_failure_reports_raw_body() {
    let mock_server = MockServer::start().await;

    // The body carries a `message`, but status failures never extract it.
    let body = r#"{"message": "Search not found"}"#;
    Mock::given(method("GET"))
        .and(path(search_path("missing")))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&mock_server)
        .await;

    let err = client_with_token(&mock_server)
        .status("missing", None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), format!("search missing failed; {}", body));
    assert_eq!(err.search_handle(), Some("missing"));
}

#[tokio::test]
async fn test_search_handle_is_path_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ariel/searches/a%2Fb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "EXECUTE",
            "record_count": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let progress = client_with_token(&mock_server)
        .status("a/b", None)
        .await
        .unwrap();

    assert_eq!(progress.status, SearchStatus::NonTerminal("EXECUTE".to_string()));
    assert_eq!(progress.record_count, 3);
}
