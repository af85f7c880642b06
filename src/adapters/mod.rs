//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `source` - Files and standard input, via tokio
//! - `websocket` - Live tail sessions over axum WebSockets
//! - `http` - Viewer page, source listing, and the app router

pub mod http;
pub mod source;
pub mod websocket;

pub use http::{app_router, AppState};
pub use source::{LocalSourceOpener, StreamSourceReader};
pub use websocket::{SessionCoordinator, SessionSettings};
