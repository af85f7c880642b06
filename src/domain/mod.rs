//! Domain layer containing the tailing vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, errors, state machine trait)
//! - `source` - Source identifiers, lines, line framing, the registry
//! - `session` - Tail session lifecycle and termination reasons

pub mod foundation;
pub mod session;
pub mod source;
