//! Data models for Ariel API responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod search;

pub use search::{CompletedSearch, ResultRange, SearchCreated, SearchProgress, SearchStatus};
