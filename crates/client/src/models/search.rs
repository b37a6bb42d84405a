//! Ariel search models.
//!
//! # What this module handles:
//! - Search status values and their terminal/non-terminal classification
//! - Submission and status response bodies
//! - Validated result ranges
//!
//! # What this module does NOT handle:
//! - HTTP transport (see [`crate::endpoints::search`])
//! - The polling state machine (see [`crate::endpoints::search::wait_for_search`])
//!
//! # Invariants
//! - Any status string other than `COMPLETED`, `CANCELED` or `ERROR` is non-terminal,
//!   including values this crate has never seen. Such searches keep being polled.
//! - A [`ResultRange`] always satisfies `end == 0 || start <= end`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClientError, Result};

/// Lifecycle status reported by the search service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SearchStatus {
    Completed,
    Canceled,
    Error,
    /// `WAIT`, `EXECUTE`, `SORTING`, or any unrecognized value.
    NonTerminal(String),
}

impl SearchStatus {
    /// Whether polling stops at this status.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::NonTerminal(_))
    }

    /// Whether the search ended without producing results.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Canceled | Self::Error)
    }

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
            Self::Error => "ERROR",
            Self::NonTerminal(raw) => raw,
        }
    }
}

impl From<String> for SearchStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "COMPLETED" => Self::Completed,
            "CANCELED" => Self::Canceled,
            "ERROR" => Self::Error,
            _ => Self::NonTerminal(raw),
        }
    }
}

impl From<&str> for SearchStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<SearchStatus> for String {
    fn from(status: SearchStatus) -> Self {
        match status {
            SearchStatus::NonTerminal(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a successful search submission (`fields=status,search_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCreated {
    pub status: SearchStatus,
    pub search_id: String,
}

/// Body of a successful status request (`fields=status,record_count`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProgress {
    pub status: SearchStatus,
    #[serde(deserialize_with = "crate::serde_helpers::u64_from_string_or_number")]
    pub record_count: u64,
}

/// A search that reached `COMPLETED`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSearch {
    pub search_id: String,
    pub record_count: u64,
}

/// Which slice of a result set to fetch.
///
/// `end == 0` means the whole result set and sends no `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultRange {
    start: u64,
    end: u64,
}

impl ResultRange {
    /// The full result set (no `Range` header).
    pub fn all() -> Self {
        Self::default()
    }

    /// Validate a caller-supplied range.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRange`] if `start < 0` or `end < start`.
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start < 0 || end < start {
            return Err(ClientError::InvalidRange { start, end });
        }
        Ok(Self {
            start: start as u64,
            end: end as u64,
        })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Whether this range asks for every record.
    pub fn is_all(&self) -> bool {
        self.end == 0
    }

    /// Value for the `Range` request header, if one should be sent.
    pub fn header_value(&self) -> Option<String> {
        (!self.is_all()).then(|| format!("items={}-{}", self.start, self.end))
    }
}
