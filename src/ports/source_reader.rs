//! Source Reader Port - line-at-a-time access to an append-only stream.

use async_trait::async_trait;

use crate::domain::foundation::TailError;
use crate::domain::source::{Line, SourceId};

/// Errors raised while opening or reading a source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source not found: {0}")]
    NotFound(SourceId),

    #[error("Source unreadable: {source_id}: {reason}")]
    Unreadable { source_id: SourceId, reason: String },
}

impl SourceError {
    /// Builds an error from an I/O failure, mapping `NotFound` through.
    pub fn from_io(source_id: &SourceId, err: &std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            SourceError::NotFound(source_id.clone())
        } else {
            SourceError::Unreadable {
                source_id: source_id.clone(),
                reason: err.to_string(),
            }
        }
    }
}

impl From<SourceError> for TailError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(source_id) => {
                TailError::source_unreadable(source_id, "not found")
            }
            SourceError::Unreadable { source_id, reason } => {
                TailError::source_unreadable(source_id, reason)
            }
        }
    }
}

/// One open, sequentially read source.
///
/// `next` must distinguish three outcomes:
/// - `Ok(Some(line))`: a line is available
/// - `Ok(None)`: nothing new yet; the source may still grow
/// - `Err(_)`: the stream is unusable and the session should end
///
/// Implementations must be cancel-safe: dropping a pending `next` future
/// must not lose or duplicate bytes, because the poller bounds each call
/// with a deadline.
#[async_trait]
pub trait SourceReader: Send {
    /// The source this reader is bound to.
    fn source_id(&self) -> &SourceId;

    /// Returns the next available line, if any.
    async fn next(&mut self) -> Result<Option<Line>, SourceError>;
}

/// Opens sources on behalf of the session coordinator.
#[async_trait]
pub trait SourceOpener: Send + Sync {
    /// Opens `source_id` for reading.
    ///
    /// # Errors
    ///
    /// - `SourceError::NotFound` if the identifier does not resolve
    /// - `SourceError::Unreadable` for any other open failure
    async fn open(&self, source_id: &SourceId) -> Result<Box<dyn SourceReader>, SourceError>;
}
