//! Source adapters - tokio-backed implementations of the source ports.
//!
//! - [`StreamSourceReader`] frames any `AsyncRead` into lines
//! - [`LocalSourceOpener`] opens files and standard input

mod local_opener;
mod stream_reader;

pub use local_opener::LocalSourceOpener;
pub use stream_reader::{EndOfStream, StreamSourceReader};
