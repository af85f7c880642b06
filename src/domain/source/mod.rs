//! Source module - what can be tailed and how bytes become lines.
//!
//! - [`SourceId`] names a file or the standard-input sentinel
//! - [`Line`] is one framed unit of output
//! - [`LineBuffer`] carries partial bytes across reads
//! - [`SourceRegistry`] is the immutable allow-list built at startup

mod line;
mod line_buffer;
mod registry;
mod source_id;

pub use line::Line;
pub use line_buffer::{LineBuffer, DEFAULT_MAX_LINE_BYTES};
pub use registry::SourceRegistry;
pub use source_id::SourceId;
