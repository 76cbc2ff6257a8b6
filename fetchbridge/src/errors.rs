//! Error types for bridged fetch operations.
//!
//! The taxonomy is deliberately flat: either the underlying operation
//! reported a transport-level failure, or it completed without supplying a
//! usable payload and the bridge synthesized a missing-response error. The
//! bridge never recovers an error locally; every failure is forwarded to the
//! awaiting caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error type produced by a bridged fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// A failure supplied by the underlying operation's completion callback.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The operation completed without a payload, response metadata, or an
    /// explicit error.
    #[error("invalid or missing response")]
    InvalidResponse,
}

impl FetchError {
    /// Returns true if the underlying operation reported this failure as a
    /// cancellation.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::Transport(e) if e.kind == TransportErrorKind::Cancelled
        )
    }
}

/// A transport-level failure supplied by the underlying operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("transport error ({kind}): {message}")]
pub struct TransportError {
    /// The broad failure category.
    pub kind: TransportErrorKind,
    /// Human-readable detail from the transport.
    pub message: String,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a cancellation-flavored transport error.
    #[must_use]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Cancelled, message)
    }

    /// Returns true if this error reports a cancellation.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        self.kind == TransportErrorKind::Cancelled
    }
}

/// Broad categories for transport-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportErrorKind {
    /// The operation was cancelled before it could complete.
    Cancelled,
    /// The connection was lost mid-operation.
    ConnectionLost,
    /// The transport gave up waiting.
    TimedOut,
    /// Any other transport failure.
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Cancelled => "cancelled",
            Self::ConnectionLost => "connection lost",
            Self::TimedOut => "timed out",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::new(TransportErrorKind::ConnectionLost, "peer reset");
        assert_eq!(err.to_string(), "transport error (connection lost): peer reset");
    }

    #[test]
    fn test_fetch_error_wraps_transport() {
        let err: FetchError = TransportError::cancelled("task cancelled").into();
        assert!(err.is_cancellation());
        assert!(err.to_string().contains("task cancelled"));
    }

    #[test]
    fn test_invalid_response_is_not_cancellation() {
        assert!(!FetchError::InvalidResponse.is_cancellation());
    }

    #[test]
    fn test_non_cancellation_kinds() {
        let err: FetchError = TransportError::new(TransportErrorKind::TimedOut, "30s").into();
        assert!(!err.is_cancellation());
    }
}
