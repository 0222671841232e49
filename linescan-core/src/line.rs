//! Parsed line value type

use core::fmt;

use crate::view::CharView;

/// One parsed line: where it sits in the file, how many bytes it spans, and
/// its decoded content.
///
/// `offset` and `byte_len` describe the content bytes only; the terminator
/// is excluded from both. A `Line` is immutable and cheap to clone — the
/// content view shares its backing storage — so callers may keep lines
/// around after the scan has moved on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    offset: u64,
    byte_len: u32,
    content: CharView,
}

impl Line {
    /// Assemble a line value.
    pub fn new(offset: u64, byte_len: u32, content: CharView) -> Self {
        Self {
            offset,
            byte_len,
            content,
        }
    }

    /// Byte offset of the first content byte in the file.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Length of the content in bytes (not code units).
    pub fn byte_len(&self) -> u32 {
        self.byte_len
    }

    /// The decoded content, terminator excluded.
    pub fn content(&self) -> &CharView {
        &self.content
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}
