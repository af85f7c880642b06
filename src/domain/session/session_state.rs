//! SessionState enum for the lifecycle of a tail session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle of a tail session.
///
/// ```text
/// Pending ──► Validating ──► Active ──► Terminated
///                  │                        ▲
///                  └────────────────────────┘  (rejected)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Upgrade request received, source identifier extracted.
    #[default]
    Pending,
    /// Identifier being checked against the registry.
    Validating,
    /// Upgraded; source open and both loops running.
    Active,
    /// Either loop exited, or validation failed.
    Terminated,
}

impl StateMachine for SessionState {
    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            Pending => vec![Validating],
            Validating => vec![Active, Terminated],
            Active => vec![Terminated],
            Terminated => vec![],
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Pending => "Pending",
            SessionState::Validating => "Validating",
            SessionState::Active => "Active",
            SessionState::Terminated => "Terminated",
        };
        write!(f, "{}", s)
    }
}
