//! A single framed line of source output.

/// Bytes read from a source, ending in `\n` unless the line is partial.
///
/// A partial line only appears when the stream ended mid-line, a read
/// failed with bytes still buffered, or the line exceeded the size cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
    terminated: bool,
}

impl Line {
    /// A complete line. `bytes` must end with the newline.
    pub fn terminated(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.last() == Some(&b'\n'));
        Self {
            bytes,
            terminated: true,
        }
    }

    /// A trailing or oversized chunk with no newline.
    pub fn partial(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            terminated: false,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Converts to text for a WebSocket text frame.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD.
    pub fn into_text(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}
