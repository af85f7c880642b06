//! webtail - live tail of files or stdin in the browser
//!
//! This crate streams newly appended lines of a text source to browser
//! clients over WebSockets, keeping each connection alive with pings and
//! tearing it down when the peer stalls or disappears.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
pub mod server;
