//! Identifier for a tailable source.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// A tailable source: a file path or the standard-input sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// The process's standard input.
    Stdin,
    /// A file, identified by its absolute path.
    File(PathBuf),
}

impl SourceId {
    /// Display form of the standard-input sentinel.
    pub const STDIN_LABEL: &'static str = "<stdin>";

    /// Creates a file source id.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        SourceId::File(path.into())
    }

    pub fn is_stdin(&self) -> bool {
        matches!(self, SourceId::Stdin)
    }

    /// Returns the file path, if this is a file source.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            SourceId::File(path) => Some(path),
            SourceId::Stdin => None,
        }
    }

    /// True when `requested` names this source exactly.
    ///
    /// No normalization happens here: paths are compared as given.
    pub fn matches(&self, requested: &str) -> bool {
        match self {
            SourceId::File(path) => path.as_os_str() == requested,
            SourceId::Stdin => false,
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceId::Stdin => f.write_str(Self::STDIN_LABEL),
            SourceId::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for SourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
