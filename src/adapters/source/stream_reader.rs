//! Line reader over any async byte stream.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::domain::source::{Line, LineBuffer, SourceId};
use crate::ports::{SourceError, SourceReader};

const READ_CHUNK_BYTES: usize = 8 * 1024;

/// What a zero-byte read means for the underlying stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfStream {
    /// More bytes may be appended later (regular files).
    MayGrow,
    /// The stream is finished (pipes, standard input). The buffered
    /// partial line is flushed once and the reader then stays idle.
    Final,
}

/// Reads an `AsyncRead` and hands out lines through [`SourceReader`].
///
/// Each call performs at most one underlying read. The read goes into
/// a reader-owned chunk buffer via `AsyncReadExt::read`, which is
/// cancel-safe, so a deadline can drop the call without losing bytes.
pub struct StreamSourceReader<R> {
    source_id: SourceId,
    reader: R,
    buffer: LineBuffer,
    chunk: Box<[u8]>,
    end_of_stream: EndOfStream,
    exhausted: bool,
    deferred_error: Option<SourceError>,
}

impl<R> StreamSourceReader<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(source_id: SourceId, reader: R, max_line_bytes: usize) -> Self {
        Self {
            source_id,
            reader,
            buffer: LineBuffer::new(max_line_bytes),
            chunk: vec![0u8; READ_CHUNK_BYTES].into_boxed_slice(),
            end_of_stream: EndOfStream::MayGrow,
            exhausted: false,
            deferred_error: None,
        }
    }

    /// Sets how a zero-byte read is interpreted.
    pub fn with_end_of_stream(mut self, end_of_stream: EndOfStream) -> Self {
        self.end_of_stream = end_of_stream;
        self
    }

    /// Bytes read but not yet emitted as a line.
    pub fn pending_bytes(&self) -> usize {
        self.buffer.pending()
    }
}

#[async_trait]
impl<R> SourceReader for StreamSourceReader<R>
where
    R: AsyncRead + Unpin + Send,
{
    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    async fn next(&mut self) -> Result<Option<Line>, SourceError> {
        if let Some(line) = self.buffer.next_line() {
            return Ok(Some(line));
        }
        if let Some(err) = self.deferred_error.take() {
            return Err(err);
        }
        if self.exhausted {
            return Ok(None);
        }

        let read = match self.reader.read(&mut self.chunk).await {
            Ok(read) => read,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => return Ok(None),
            Err(err) => {
                let err = SourceError::from_io(&self.source_id, &err);
                // Flush what we have; the error follows on the next call.
                return match self.buffer.take_partial() {
                    Some(partial) => {
                        self.deferred_error = Some(err);
                        Ok(Some(partial))
                    }
                    None => Err(err),
                };
            }
        };

        if read == 0 {
            if self.end_of_stream == EndOfStream::Final {
                self.exhausted = true;
                tracing::debug!(source = %self.source_id, "source reached end of stream");
                return Ok(self.buffer.take_partial());
            }
            return Ok(None);
        }

        self.buffer.push(&self.chunk[..read]);
        Ok(self.buffer.next_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncWriteExt, ReadBuf};

    use crate::domain::source::DEFAULT_MAX_LINE_BYTES;

    /// Yields `data` once, then fails every read.
    struct FailingReader {
        data: Option<Vec<u8>>,
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<std::io::Result<()>> {
            match self.data.take() {
                Some(data) => {
                    buf.put_slice(&data);
                    Poll::Ready(Ok(()))
                }
                None => Poll::Ready(Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "device gone",
                ))),
            }
        }
    }

    #[tokio::test]
    async fn file_keeps_partial_line_until_completed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a\nb").unwrap();
        file.flush().unwrap();

        let handle = tokio::fs::File::open(file.path()).await.unwrap();
        let mut reader =
            StreamSourceReader::new(SourceId::file(file.path()), handle, DEFAULT_MAX_LINE_BYTES);

        assert_eq!(reader.next().await.unwrap(), Some(Line::terminated(b"a\n".to_vec())));
        assert_eq!(reader.next().await.unwrap(), None);
        assert_eq!(reader.next().await.unwrap(), None);
        assert_eq!(reader.pending_bytes(), 1);

        file.write_all(b"c\n").unwrap();
        file.flush().unwrap();

        assert_eq!(reader.next().await.unwrap(), Some(Line::terminated(b"bc\n".to_vec())));
        assert_eq!(reader.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn final_stream_flushes_partial_once() {
        let (mut tx, rx) = tokio::io::duplex(64);
        tx.write_all(b"x\ny").await.unwrap();
        drop(tx);

        let mut reader = StreamSourceReader::new(SourceId::Stdin, rx, DEFAULT_MAX_LINE_BYTES)
            .with_end_of_stream(EndOfStream::Final);

        assert_eq!(reader.next().await.unwrap(), Some(Line::terminated(b"x\n".to_vec())));
        assert_eq!(reader.next().await.unwrap(), Some(Line::partial(b"y".to_vec())));
        assert_eq!(reader.next().await.unwrap(), None);
        assert_eq!(reader.next().await.unwrap(), None);
    }

    #[tokio::test]
    async fn read_error_flushes_partial_then_fails() {
        let failing = FailingReader {
            data: Some(b"abc".to_vec()),
        };
        let mut reader = StreamSourceReader::new(SourceId::file("/dev/x"), failing, 1024);

        assert_eq!(reader.next().await.unwrap(), None);
        assert_eq!(reader.next().await.unwrap(), Some(Line::partial(b"abc".to_vec())));

        let err = reader.next().await.unwrap_err();
        assert!(matches!(err, SourceError::Unreadable { ref reason, .. } if reason == "device gone"));
    }

    #[tokio::test]
    async fn read_error_with_empty_buffer_fails_immediately() {
        let failing = FailingReader { data: None };
        let mut reader = StreamSourceReader::new(SourceId::file("/dev/x"), failing, 1024);
        assert!(reader.next().await.is_err());
    }

    #[tokio::test]
    async fn drains_several_lines_from_one_read() {
        let (mut tx, rx) = tokio::io::duplex(64);
        tx.write_all(b"1\n2\n3\n").await.unwrap();

        let mut reader = StreamSourceReader::new(SourceId::Stdin, rx, DEFAULT_MAX_LINE_BYTES);
        let mut lines = Vec::new();
        for _ in 0..3 {
            lines.push(reader.next().await.unwrap().unwrap().into_text());
        }
        assert_eq!(lines, vec!["1\n", "2\n", "3\n"]);
        assert_eq!(reader.source_id(), &SourceId::Stdin);
    }
}
