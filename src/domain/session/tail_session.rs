//! TailSession - one viewer's binding to one source.

use crate::domain::foundation::{SessionId, StateMachine, ValidationError};
use crate::domain::source::SourceId;

use super::SessionState;

/// Tracks the identity, bound source and lifecycle state of a session.
///
/// The connection and loops live in the websocket adapter; this type
/// only enforces that the lifecycle moves forward legally.
#[derive(Debug, Clone)]
pub struct TailSession {
    id: SessionId,
    source: Option<SourceId>,
    state: SessionState,
}

impl TailSession {
    /// Starts a session in `Pending`.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            source: None,
            state: SessionState::Pending,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn source(&self) -> Option<&SourceId> {
        self.source.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Pending → Validating.
    pub fn begin_validation(&mut self) -> Result<(), ValidationError> {
        self.advance(SessionState::Validating)
    }

    /// Records the resolved source. Only legal while validating.
    pub fn bind(&mut self, source: SourceId) -> Result<(), ValidationError> {
        if self.state != SessionState::Validating {
            return Err(ValidationError::invalid_format(
                "source",
                format!("cannot bind a source while {}", self.state),
            ));
        }
        self.source = Some(source);
        Ok(())
    }

    /// Validating → Active. Requires a bound source.
    pub fn activate(&mut self) -> Result<(), ValidationError> {
        if self.source.is_none() {
            return Err(ValidationError::empty_field("source"));
        }
        self.advance(SessionState::Active)
    }

    /// Validating | Active → Terminated.
    pub fn terminate(&mut self) -> Result<(), ValidationError> {
        self.advance(SessionState::Terminated)
    }

    fn advance(&mut self, target: SessionState) -> Result<(), ValidationError> {
        self.state = self.state.transition_to(target)?;
        Ok(())
    }
}

impl Default for TailSession {
    fn default() -> Self {
        Self::new()
    }
}
