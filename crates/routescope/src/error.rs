//! Error types for routescope operations.

use std::io;
use thiserror::Error;

/// The error type for routescope operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The graph document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A filter identifier that is not in the registry.
    #[error("Unknown filter '{name}'. Available filters: {available}")]
    UnknownFilter {
        /// The identifier that was rejected.
        name: String,
        /// Comma-separated list of valid identifiers.
        available: String,
    },

    /// Query input rejected before traversal.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Failure to read or parse the graph document.
///
/// Both variants keep the underlying cause as their `source` and repeat it in
/// the display message.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("Failed to load graph from {location}: {source}")]
    Read {
        /// Where the graph was being read from.
        location: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The source was read but is not a valid graph document.
    #[error("Failed to parse graph from {location}: {source}")]
    Parse {
        /// Where the graph was being read from.
        location: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// A specialized Result type for routescope operations.
pub type Result<T> = std::result::Result<T, Error>;
