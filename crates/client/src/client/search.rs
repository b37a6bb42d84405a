//! Search lifecycle methods for [`ArielClient`].
//!
//! # What this module handles:
//! - Submitting a search
//! - Reading a search's status
//! - Submitting and waiting until the search is terminal or the time budget runs out
//!   (explicit budget, or the 60 second default)
//! - Fetching all or part of a result set
//!
//! # What this module does NOT handle:
//! - Low-level HTTP calls (in [`crate::endpoints::search`])
//! - Interpreting result documents; they are returned verbatim
//!
//! # Invariants
//! - Tokens are resolved before every HTTP call, so a missing credential fails
//!   before anything is sent.
//! - Range validation happens before token resolution and before any HTTP call.

use std::time::Duration;

use ariel_config::constants::DEFAULT_SEARCH_TIMEOUT_SECS;
use tokio::time::Instant;

use crate::auth::RequestContext;
use crate::client::ArielClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{CompletedSearch, ResultRange, SearchCreated, SearchProgress};

impl ArielClient {
    /// Submit an AQL query. The search runs asynchronously on the service.
    ///
    /// Returns the status and search handle reported by the service.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthFailed`](crate::ClientError::AuthFailed) if no SEC token is available.
    /// - [`ClientError::Search`](crate::ClientError::Search) if the service does not answer 201;
    ///   the message is the body's JSON `message`, or the raw body.
    pub async fn submit(
        &self,
        query: &str,
        context: Option<&dyn RequestContext>,
    ) -> Result<SearchCreated> {
        let headers = self.request_headers(context)?;
        endpoints::create_search(&self.http, &self.base_url, &headers, query).await
    }

    /// Get the status and record count of a search.
    ///
    /// # Errors
    ///
    /// [`ClientError::Search`](crate::ClientError::Search) carrying the raw
    /// body if the service does not answer 200.
    pub async fn status(
        &self,
        search_id: &str,
        context: Option<&dyn RequestContext>,
    ) -> Result<SearchProgress> {
        let headers = self.request_headers(context)?;
        endpoints::get_search_status(&self.http, &self.base_url, &headers, search_id).await
    }

    /// Submit a query and poll its status until it completes.
    ///
    /// The time budget starts before submission. Statuses are checked every
    /// [`poll_interval`](ArielClient::poll_interval); a status check always
    /// happens before the budget is compared, so `Duration::ZERO` performs
    /// exactly one check. The timeout error reports the budget in whole
    /// seconds, so a sub-second budget is reported as `0s`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Search`](crate::ClientError::Search) if the search is
    /// `CANCELED` or `ERROR` (immediately), or is still running when the budget
    /// is spent, plus any error from [`submit`](ArielClient::submit) or
    /// [`status`](ArielClient::status).
    pub async fn poll_until_terminal(
        &self,
        query: &str,
        timeout: Duration,
        context: Option<&dyn RequestContext>,
    ) -> Result<CompletedSearch> {
        let started_at = Instant::now();
        let created = self.submit(query, context).await?;
        let search_id = created.search_id;

        endpoints::wait_for_search(
            query,
            &search_id,
            started_at,
            timeout,
            self.poll_interval,
            || self.status(&search_id, context),
        )
        .await
    }

    /// [`poll_until_terminal`](ArielClient::poll_until_terminal) with the
    /// default budget of [`DEFAULT_SEARCH_TIMEOUT_SECS`] seconds.
    pub async fn run_search(
        &self,
        query: &str,
        context: Option<&dyn RequestContext>,
    ) -> Result<CompletedSearch> {
        self.poll_until_terminal(
            query,
            Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            context,
        )
        .await
    }

    /// Fetch search results.
    ///
    /// `(0, 0)` fetches the whole result set. Otherwise items `start..=end`
    /// are requested with a `Range: items=start-end` header.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRange`](crate::ClientError::InvalidRange) if
    ///   `start < 0` or `end < start`, before any other work.
    /// - [`ClientError::Search`](crate::ClientError::Search) carrying the raw
    ///   body if the service does not answer 200.
    pub async fn fetch_results(
        &self,
        search_id: &str,
        start: i64,
        end: i64,
        context: Option<&dyn RequestContext>,
    ) -> Result<serde_json::Value> {
        let range = ResultRange::new(start, end)?;
        self.fetch_range(search_id, range, context).await
    }

    /// Fetch search results for an already validated range.
    pub async fn fetch_range(
        &self,
        search_id: &str,
        range: ResultRange,
        context: Option<&dyn RequestContext>,
    ) -> Result<serde_json::Value> {
        let headers = self.request_headers(context)?;
        endpoints::get_search_results(&self.http, &self.base_url, &headers, search_id, range)
            .await
    }
}
