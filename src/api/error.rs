//! Error classification for Housecall Pro API calls.
//!
//! Every failure that crosses the tool boundary is a [`ClassifiedError`]:
//! a kind tag, a human-readable message, the originating HTTP status
//! (0 when no response was obtained) and opaque details.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for a single API call.
pub type ApiResult<T> = std::result::Result<T, ClassifiedError>;

/// Fallback message for transport failures that carry no text.
const NETWORK_FALLBACK_MESSAGE: &str = "Network request failed";

/// The kind tag of a [`ClassifiedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The remote endpoint answered with a non-2xx status.
    #[serde(rename = "APIError")]
    Api,

    /// No usable response was obtained (DNS, refused connection, timeout...).
    #[serde(rename = "NetworkError")]
    Network,

    /// A fault inside local handler logic.
    #[serde(rename = "ExecutionError")]
    Execution,
}

impl ErrorKind {
    /// Wire name of this kind, as rendered in error envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "APIError",
            Self::Network => "NetworkError",
            Self::Execution => "ExecutionError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged, immutable error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    status: u16,
    details: String,
}

impl ClassifiedError {
    /// A non-2xx answer from the API. `details` is the raw response body.
    pub fn api(status: u16, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Api,
            message: message.into(),
            status,
            details: details.into(),
        }
    }

    /// A failure before any response was obtained.
    pub fn network(message: impl Into<String>, details: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: ErrorKind::Network,
            message: if message.is_empty() {
                NETWORK_FALLBACK_MESSAGE.to_string()
            } else {
                message
            },
            status: 0,
            details: details.into(),
        }
    }

    /// Build a network error from a reqwest failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self::network(err.to_string(), format!("{err:?}"))
    }

    /// A local fault, down-ranked by the dispatcher.
    pub fn execution(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Execution,
            message: message.into(),
            status: 0,
            details: details.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed call, `0` for transport-level failures.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

/// Errors produced by the higher-level client helpers (pagination).
#[derive(Debug, Error)]
pub enum ClientError {
    /// A classified transport error, propagated unchanged.
    #[error(transparent)]
    Classified(#[from] ClassifiedError),

    /// The endpoint answered 2xx but the body did not have the expected shape.
    #[error("Unexpected response from {path}: {source}")]
    UnexpectedResponse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub fn unexpected_response(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::UnexpectedResponse {
            path: path.into(),
            source,
        }
    }

    /// The classified error, if this failure carries one.
    #[cfg(test)]
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            Self::Classified(e) => Some(e),
            Self::UnexpectedResponse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_has_zero_status() {
        let err = ClassifiedError::network("connection refused", "io error");
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), 0);
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn test_network_error_empty_message_falls_back() {
        let err = ClassifiedError::network("", "");
        assert_eq!(err.message(), "Network request failed");
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(serde_json::to_value(ErrorKind::Api).unwrap(), "APIError");
        assert_eq!(ErrorKind::Network.to_string(), "NetworkError");
        assert_eq!(ErrorKind::Execution.as_str(), "ExecutionError");
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = ClassifiedError::api(404, "Job not found", "{}");
        assert_eq!(err.to_string(), "APIError: Job not found");
    }
}
