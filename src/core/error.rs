//! Error types for server startup.
//!
//! Failures inside a tool invocation never reach this type: they are
//! classified by the API layer and rendered by the dispatcher. This enum
//! covers what can go wrong before the server is ready to accept calls.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified startup error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors (missing credentials, bad values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
