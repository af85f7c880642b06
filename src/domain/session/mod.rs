//! Session module - lifecycle of one viewer bound to one source.

mod session_state;
mod tail_session;
mod termination;

pub use session_state::SessionState;
pub use tail_session::TailSession;
pub use termination::TerminationReason;
