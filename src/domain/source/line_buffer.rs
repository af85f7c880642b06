//! Reassembles lines from arbitrarily split reads.

use super::Line;

/// Default cap on a single emitted line (64 KiB).
pub const DEFAULT_MAX_LINE_BYTES: usize = 64 * 1024;

/// Buffers bytes across reads and hands out complete lines.
///
/// Bytes after the last newline stay buffered until a newline arrives,
/// so a line written across two reads is emitted once and whole. A line
/// that grows past `max_line_bytes` without a newline is cut into
/// partial chunks of that size.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Vec<u8>,
    /// Prefix of `buf` already searched for a newline.
    scanned: usize,
    max_line_bytes: usize,
}

impl LineBuffer {
    /// Creates a buffer. A cap of zero is treated as one byte.
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            buf: Vec::new(),
            scanned: 0,
            max_line_bytes: max_line_bytes.max(1),
        }
    }

    /// Appends freshly read bytes.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Takes the next complete line, if one is buffered.
    pub fn next_line(&mut self) -> Option<Line> {
        let newline = self.buf[self.scanned..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|offset| self.scanned + offset);

        match newline {
            Some(end) if end < self.max_line_bytes => {
                self.scanned = 0;
                Some(Line::terminated(self.buf.drain(..=end).collect()))
            }
            _ if self.buf.len() >= self.max_line_bytes => {
                self.scanned = 0;
                let cut = char_boundary_before(&self.buf, self.max_line_bytes);
                Some(Line::partial(self.buf.drain(..cut).collect()))
            }
            _ => {
                self.scanned = self.buf.len();
                None
            }
        }
    }

    /// Drains whatever is buffered as an unterminated line.
    pub fn take_partial(&mut self) -> Option<Line> {
        if self.buf.is_empty() {
            return None;
        }
        self.scanned = 0;
        Some(Line::partial(std::mem::take(&mut self.buf)))
    }

    /// Number of buffered bytes not yet emitted.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

/// Moves `cut` back so it does not split a UTF-8 sequence.
///
/// Falls back to `cut` itself when the sequence starts at the front of
/// the buffer, so every chunk makes progress.
fn char_boundary_before(buf: &[u8], cut: usize) -> usize {
    let is_continuation = |b: u8| b & 0b1100_0000 == 0b1000_0000;

    let mut start = cut - 1;
    while start > 0 && cut - start < 4 && is_continuation(buf[start]) {
        start -= 1;
    }

    let width = match buf[start] {
        b if b & 0b1110_0000 == 0b1100_0000 => 2,
        b if b & 0b1111_0000 == 0b1110_0000 => 3,
        b if b & 0b1111_1000 == 0b1111_0000 => 4,
        _ => 1,
    };

    if start > 0 && start + width > cut {
        start
    } else {
        cut
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_BYTES)
    }
}
