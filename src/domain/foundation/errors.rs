//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors raised when a value or state change is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Stable codes for tail failures, used as a structured log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidSource,
    SourceUnreadable,
    ConnectionLost,
    UpgradeFailed,
    InvalidStateTransition,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidSource => "invalid_source",
            ErrorCode::SourceUnreadable => "source_unreadable",
            ErrorCode::ConnectionLost => "connection_lost",
            ErrorCode::UpgradeFailed => "upgrade_failed",
            ErrorCode::InvalidStateTransition => "invalid_state_transition",
        };
        write!(f, "{}", s)
    }
}

/// Failures that prevent or end a tail session.
///
/// None of these stop the server: each one is handled by refusing the
/// request or tearing down the affected session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TailError {
    /// Requested identifier is not in the source registry.
    #[error("Source not registered: {0}")]
    InvalidSource(String),

    /// Source could not be opened, or a read failed mid-stream.
    #[error("Source unreadable: {source_id}: {reason}")]
    SourceUnreadable { source_id: String, reason: String },

    /// A deadline was exceeded or the transport failed.
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// The request could not be upgraded to a WebSocket.
    #[error("Upgrade failed: {0}")]
    UpgradeFailed(String),

    #[error("Invalid session transition: {0}")]
    InvalidTransition(#[from] ValidationError),
}

impl TailError {
    /// Creates a source unreadable error.
    pub fn source_unreadable(source_id: impl ToString, reason: impl Into<String>) -> Self {
        TailError::SourceUnreadable {
            source_id: source_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TailError::InvalidSource(_) => ErrorCode::InvalidSource,
            TailError::SourceUnreadable { .. } => ErrorCode::SourceUnreadable,
            TailError::ConnectionLost(_) => ErrorCode::ConnectionLost,
            TailError::UpgradeFailed(_) => ErrorCode::UpgradeFailed,
            TailError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
        }
    }
}
