//! Registry error types
//!
//! Error types for stream registry operations.

use thiserror::Error;

/// Error type for registry operations
///
/// Only raised for caller mistakes. Failures inside a poll cycle are
/// reported to listeners as [`CycleError`](crate::stream::CycleError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Stream id was never registered
    #[error("Stream not found: {0}")]
    StreamNotFound(String),
}
