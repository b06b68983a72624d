//! Crate error types

use thiserror::Error;

use crate::registry::RegistryError;
use crate::stream::{ConfigError, CycleError};

/// Top-level error
#[derive(Debug, Error)]
pub enum Error {
    /// Operation on an unregistered stream
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Invalid stream definition
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failed poll cycle
    #[error(transparent)]
    Cycle(#[from] CycleError),

    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
