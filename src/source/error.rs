//! Errors produced while fetching a snapshot.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when fetching a snapshot from a source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not complete (connect, timeout, read).
    #[error("request failed: {0}")]
    Network(String),

    /// The controller answered with something other than 200.
    #[error("unexpected status {0}")]
    BadStatus(u16),

    /// The body is not a well-formed snapshot.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Returns the kind of failure, for logging and status display.
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Network(_) => FailureKind::NetworkFailure,
            FetchError::BadStatus(_) => FailureKind::BadStatus,
            FetchError::Parse(_) => FailureKind::ParseError,
        }
    }
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkFailure,
    BadStatus,
    ParseError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::NetworkFailure => "network",
            FailureKind::BadStatus => "bad-status",
            FailureKind::ParseError => "parse",
        };
        f.write_str(name)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network(format!("timed out: {}", err))
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
