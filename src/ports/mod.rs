//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SourceReader` - Pull the next line out of an open byte stream
//! - `SourceOpener` - Turn a resolved [`SourceId`] into a reader
//!
//! [`SourceId`]: crate::domain::source::SourceId

mod source_reader;

pub use source_reader::{SourceError, SourceOpener, SourceReader};
