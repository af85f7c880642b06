//! State machine trait for lifecycle enums.

use super::ValidationError;

/// Trait for status enums that move through a fixed set of transitions.
///
/// Implementors list the legal targets for each state and get a checked
/// `transition_to` for free.
///
/// ```ignore
/// let state = SessionState::Pending.transition_to(SessionState::Validating)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if a transition from self to target is allowed.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs the transition, or reports it as invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// True when no further transitions exist.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
