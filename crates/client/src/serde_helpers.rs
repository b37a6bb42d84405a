//! Serde helpers for the Ariel API's inconsistent JSON typing.
//!
//! Responsibilities:
//! - Provide deserializers that accept either JSON numbers or strings for numeric fields.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional business rules).
//!
//! Invariants / assumptions:
//! - Counts such as `record_count` may arrive as `"123"` strings or as `123` numbers.
//! - These helpers must not log; errors are generic parse errors.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

impl U64OrString {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            U64OrString::U64(v) => Ok(v),
            U64OrString::I64(v) => u64::try_from(v).map_err(E::custom),
            U64OrString::String(s) => s.trim().parse::<u64>().map_err(E::custom),
        }
    }
}

pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    U64OrString::deserialize(deserializer)?.into_u64()
}
