//! Response DTOs for the page-serving endpoints.

use serde::Serialize;

use crate::domain::source::{SourceId, SourceRegistry};

/// Whether the server tails files or its standard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Files,
    Stdin,
}

/// Listing of selectable sources, as served by `GET /api/sources` and
/// embedded in the viewer page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcesResponse {
    pub mode: SourceMode,
    pub sources: Vec<SourceId>,
}

impl SourcesResponse {
    pub fn from_registry(registry: &SourceRegistry) -> Self {
        if registry.is_stdin_mode() {
            Self {
                mode: SourceMode::Stdin,
                sources: Vec::new(),
            }
        } else {
            Self {
                mode: SourceMode::Files,
                sources: registry.sources().to_vec(),
            }
        }
    }
}
