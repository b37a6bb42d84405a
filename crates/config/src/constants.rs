//! Centralized constants for the Ariel client workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Search & Polling Defaults
// =============================================================================

/// Fixed interval between search status checks, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// Default time budget for a search to reach a terminal status, in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// API Defaults
// =============================================================================

/// Value sent in the `Version` header on every Ariel API request.
pub const DEFAULT_API_VERSION: &str = "5.1";
