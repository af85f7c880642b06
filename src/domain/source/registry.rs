//! The set of sources a client may ask for.

use std::path::PathBuf;

use crate::domain::foundation::TailError;

use super::SourceId;

/// Ordered, immutable allow-list of file sources.
///
/// Built once at startup and shared behind an `Arc`; lookups take `&self`
/// so concurrent sessions validate without locking. An empty registry
/// means standard-input mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRegistry {
    sources: Vec<SourceId>,
}

impl SourceRegistry {
    /// Builds a registry from file paths, dropping later duplicates.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut sources: Vec<SourceId> = Vec::new();
        for path in paths {
            let id = SourceId::file(path);
            if !sources.contains(&id) {
                sources.push(id);
            }
        }
        Self { sources }
    }

    /// A registry for standard-input mode.
    pub fn stdin_only() -> Self {
        Self::default()
    }

    pub fn is_stdin_mode(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolves the `file` request parameter to a source.
    ///
    /// - stdin mode: anything, including nothing, binds to standard input
    /// - absent or empty: the sole registered source; refused when there
    ///   are several to choose from
    /// - otherwise: an exact match, or [`TailError::InvalidSource`]
    pub fn resolve(&self, requested: Option<&str>) -> Result<SourceId, TailError> {
        if self.sources.is_empty() {
            return Ok(SourceId::Stdin);
        }

        match requested {
            None | Some("") => match self.sources.as_slice() {
                [sole] => Ok(sole.clone()),
                _ => Err(TailError::InvalidSource(
                    requested.unwrap_or_default().to_string(),
                )),
            },
            Some(requested) => self
                .sources
                .iter()
                .find(|source| source.matches(requested))
                .cloned()
                .ok_or_else(|| TailError::InvalidSource(requested.to_string())),
        }
    }
}
