//! Stream error types
//!
//! Errors raised while defining streams and while running poll cycles.

use std::time::Duration;

use thiserror::Error;

/// A parser rejected its input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseError(String);

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Invalid stream definition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Stream id is empty
    #[error("stream id must not be empty")]
    EmptyId,
    /// Poll interval must be positive
    #[error("stream {id}: interval must be positive, got {interval:?}")]
    ZeroInterval { id: String, interval: Duration },
}

/// Transient failure of a single poll cycle
///
/// Reported to the stream's listeners; the stream keeps running and
/// retries on its next tick.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Network or transport failure
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// Endpoint answered with a non-2xx status
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    /// Response body is not valid JSON
    #[error("invalid JSON from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// Parser returned an error
    #[error("parser failed: {0}")]
    Parse(#[from] ParseError),
    /// Parser panicked
    #[error("parser panicked: {0}")]
    ParserPanicked(String),
}

impl CycleError {
    /// HTTP status code, if the endpoint answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            CycleError::Status { status, .. } => Some(*status),
            CycleError::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
