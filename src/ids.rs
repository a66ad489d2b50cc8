//! Request identifiers.
//!
//! Every [`crate::Context`] carries a [`RequestId`] so hooks and handlers can
//! tag their log lines. Ids are ULIDs: sortable by creation time and safe to
//! forward to upstream services in the [`REQUEST_ID_HEADER`] header.

use std::fmt;
use std::str::FromStr;

use crate::response::HeaderVec;

/// Header consulted for an id minted by an upstream proxy
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Take the id from [`REQUEST_ID_HEADER`] (name matched case-insensitively)
    /// when it holds a valid ULID; mint a fresh one otherwise.
    #[must_use]
    pub fn from_headers(headers: &HeaderVec) -> Self {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(REQUEST_ID_HEADER))
            .and_then(|(_, value)| value.trim().parse().ok())
            .unwrap_or_default()
    }

    /// Milliseconds since the Unix epoch at which the id was minted.
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(Self)
    }
}
