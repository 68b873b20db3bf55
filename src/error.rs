//! Error types for the peacewater scene library
//!
//! This module defines the error types used throughout the library,
//! covering vertex-stream ingestion, bounding-volume construction, and
//! quad-tree configuration.

use std::fmt;

/// Result type for peacewater scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Peacewater scene errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Malformed interleaved vertex buffer (bad stride, truncated data)
    InvalidVertexStream(String),

    /// A bounding volume was queried or finalized without ever being grown
    EmptyBounds(String),

    /// Quad-tree world extent or depth misconfiguration
    InvalidExtent(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidVertexStream(msg) => write!(f, "Invalid vertex stream: {}", msg),
            Error::EmptyBounds(msg) => write!(f, "Empty bounds: {}", msg),
            Error::InvalidExtent(msg) => write!(f, "Invalid extent: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
