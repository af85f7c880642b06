//! Opens local files and the process's standard input.

use std::io::SeekFrom;

use async_trait::async_trait;
use tokio::io::AsyncSeekExt;

use crate::config::TailConfig;
use crate::domain::source::SourceId;
use crate::ports::{SourceError, SourceOpener, SourceReader};

use super::stream_reader::{EndOfStream, StreamSourceReader};

/// Production [`SourceOpener`].
///
/// Files are opened fresh for every session, so each viewer has its own
/// cursor. Standard input is shared by the whole process: concurrent
/// stdin sessions race for its bytes.
#[derive(Debug, Clone)]
pub struct LocalSourceOpener {
    start_at_end: bool,
    max_line_bytes: usize,
}

impl LocalSourceOpener {
    pub fn new(start_at_end: bool, max_line_bytes: usize) -> Self {
        Self {
            start_at_end,
            max_line_bytes,
        }
    }

    pub fn from_config(config: &TailConfig) -> Self {
        Self::new(config.start_at_end, config.max_line_bytes)
    }
}

#[async_trait]
impl SourceOpener for LocalSourceOpener {
    async fn open(&self, source_id: &SourceId) -> Result<Box<dyn SourceReader>, SourceError> {
        match source_id {
            SourceId::Stdin => Ok(Box::new(
                StreamSourceReader::new(
                    SourceId::Stdin,
                    tokio::io::stdin(),
                    self.max_line_bytes,
                )
                .with_end_of_stream(EndOfStream::Final),
            )),
            SourceId::File(path) => {
                let mut file = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| SourceError::from_io(source_id, &e))?;

                if self.start_at_end {
                    let offset = file
                        .seek(SeekFrom::End(0))
                        .await
                        .map_err(|e| SourceError::from_io(source_id, &e))?;
                    tracing::debug!(source = %source_id, offset, "starting at end of file");
                }

                Ok(Box::new(StreamSourceReader::new(
                    source_id.clone(),
                    file,
                    self.max_line_bytes,
                )))
            }
        }
    }
}
