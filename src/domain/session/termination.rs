//! Why a tail session ended.

use std::fmt;

use crate::domain::foundation::TailError;

/// The proximate cause of a session teardown.
///
/// Every exit of the writer or reader loop yields one of these, so the
/// coordinator always knows why a session died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Client sent a close frame or the inbound stream ended.
    ClientClosed,
    /// No liveness acknowledgement arrived within the read deadline.
    ReadDeadlineExpired,
    /// Inbound transport error, including oversized frames.
    ReadFailed(String),
    /// An outbound frame did not complete within the write deadline.
    WriteTimedOut,
    /// Outbound transport error.
    WriteFailed(String),
    /// The source failed mid-stream.
    SourceUnreadable(String),
    /// A session task panicked or was cancelled unexpectedly.
    TaskFailed(String),
}

impl TerminationReason {
    /// True for every reason that means the connection is gone.
    pub fn is_connection_lost(&self) -> bool {
        matches!(
            self,
            TerminationReason::ClientClosed
                | TerminationReason::ReadDeadlineExpired
                | TerminationReason::ReadFailed(_)
                | TerminationReason::WriteTimedOut
                | TerminationReason::WriteFailed(_)
        )
    }

    /// Maps the reason onto the error taxonomy, for logging.
    pub fn to_error(&self, source: impl ToString) -> TailError {
        match self {
            TerminationReason::SourceUnreadable(reason) => {
                TailError::source_unreadable(source, reason.clone())
            }
            other => TailError::ConnectionLost(other.to_string()),
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::ClientClosed => write!(f, "client closed"),
            TerminationReason::ReadDeadlineExpired => write!(f, "read deadline expired"),
            TerminationReason::ReadFailed(e) => write!(f, "read failed: {}", e),
            TerminationReason::WriteTimedOut => write!(f, "write deadline exceeded"),
            TerminationReason::WriteFailed(e) => write!(f, "write failed: {}", e),
            TerminationReason::SourceUnreadable(e) => write!(f, "source unreadable: {}", e),
            TerminationReason::TaskFailed(e) => write!(f, "session task failed: {}", e),
        }
    }
}
