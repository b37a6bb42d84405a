//! Ariel search REST API client.
//!
//! This crate provides a type-safe client for running Ariel (AQL) searches
//! against a QRadar console: submit a query, poll it until it is terminal,
//! and fetch its results. Requests authenticate with a `SEC` token taken from
//! an explicit credential or from the cookies of an inbound request.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod serde_helpers;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{CSRF_HEADER, CookieJar, HeaderSet, RequestContext, SEC_HEADER, TokenResolver};
pub use client::ArielClient;
pub use client::builder::ArielClientBuilder;
pub use error::{ClientError, Result};
pub use models::{CompletedSearch, ResultRange, SearchCreated, SearchProgress, SearchStatus};
