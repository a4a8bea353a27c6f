//! Tool-specific error types.

use thiserror::Error;

use crate::api::{ClassifiedError, ClientError};

/// Errors a tool handler can surface to the dispatcher.
///
/// Only [`ToolError::Api`] carries a classification; every other variant is
/// a local fault that the dispatcher reports as an `ExecutionError`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A classified API or network failure, passed through unchanged.
    #[error(transparent)]
    Api(#[from] ClassifiedError),

    /// The argument bag could not be decoded into the tool's parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The API answered successfully with a body of the wrong shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The tool execution failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// The classification carried by this error, if any.
    #[cfg(test)]
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClientError> for ToolError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Classified(e) => Self::Api(e),
            other @ ClientError::UnexpectedResponse { .. } => {
                Self::UnexpectedResponse(other.to_string())
            }
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::ExecutionFailed(err.to_string())
    }
}
