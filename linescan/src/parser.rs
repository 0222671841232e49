//! File orchestration: windows, scanning, decoding, callback dispatch
//!
//! The parser advances a bounded mapped window across the file and feeds
//! each window to the scanner. Three things can be true when a window is
//! done: some lines completed and the unfinished tail is re-scanned in the
//! next window; no line completed, so the window's bytes join the carry
//! buffer and the window moves past them (the only way a line longer than
//! the window makes progress); or the window was the file's last, and the
//! trailing unterminated line, if any, is emitted.
//!
//! Each window's mapping is dropped before the next is created or an error
//! propagates, so exactly one window is ever mapped at a time.

use std::fs::File;
use std::path::Path;

use encoding_rs::Encoding;
use linescan_core::{Line, WindowScanner};

use crate::decoder::{derive_terminators, LineDecoder};
use crate::error::{ParseError, Result};
use crate::region::MappedWindow;

/// Scans a file line by line through bounded memory-mapped windows.
///
/// For every line the callback receives its byte offset, byte length and
/// decoded content; terminators (CR, LF or CRLF, in the bytes of the active
/// encoding) are consumed but never delivered. The scan is synchronous and
/// single-pass, and keeps at most one window of the file mapped.
///
/// ```no_run
/// use linescan::{encoding_rs::UTF_8, LineParser};
///
/// fn index(path: &std::path::Path) -> linescan::Result<Vec<(u64, u32)>> {
///     let mut index = Vec::new();
///     LineParser::new().for_each(path, UTF_8, |line| {
///         index.push((line.offset(), line.byte_len()));
///     })?;
///     Ok(index)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LineParser {
    max_window_size: u64,
}

impl LineParser {
    /// Parser that maps as much of the file at once as the platform allows.
    pub fn new() -> Self {
        Self {
            max_window_size: u64::MAX,
        }
    }

    /// Bound the mapped window size in bytes.
    ///
    /// Smaller windows trade address-space footprint for more mapping
    /// operations. Lines longer than the window still parse: their bytes
    /// are accumulated on the heap until the terminator is found. Bounds
    /// smaller than one CRLF sequence are raised to it.
    pub fn with_max_window_size(mut self, bytes: u64) -> Self {
        self.max_window_size = bytes;
        self
    }

    /// The configured window bound.
    pub fn max_window_size(&self) -> u64 {
        self.max_window_size
    }

    /// Invoke `on_line` for every line of the file, in file order.
    ///
    /// Fails on I/O or mapping errors, on bytes the encoding cannot decode
    /// (no replacement or skipping is attempted), and on encodings without
    /// context-free terminator bytes. Lines delivered before a failure have
    /// already been decoded completely and stay valid.
    pub fn for_each<P, F>(&self, path: P, encoding: &'static Encoding, mut on_line: F) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnMut(&Line),
    {
        self.try_for_each(path, encoding, |line| {
            on_line(line);
            Ok::<(), std::convert::Infallible>(())
        })
    }

    /// Like [`for_each`](Self::for_each), but the callback may abort the
    /// scan by returning an error, which propagates as
    /// [`ParseError::Callback`] with the returned error as its source. The
    /// current window is released before propagation.
    pub fn try_for_each<P, F, E>(
        &self,
        path: P,
        encoding: &'static Encoding,
        mut on_line: F,
    ) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnMut(&Line) -> std::result::Result<(), E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let path = path.as_ref();
        let terms = derive_terminators(encoding)?;
        let mut decoder = LineDecoder::new(encoding);

        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        tracing::debug!(
            path = %path.display(),
            file_len,
            encoding = encoding.name(),
            "scan started"
        );

        // A window shorter than one CRLF could never decide a terminator.
        let max_window = self
            .max_window_size
            .max(terms.crlf_len() as u64)
            .min(usize::MAX as u64);

        let mut lines_emitted: u64 = 0;
        let mut deliver = |line: &Line| -> Result<()> {
            on_line(line).map_err(|e| ParseError::Callback(e.into()))?;
            lines_emitted += 1;
            Ok(())
        };

        // Bytes of a line that outgrew the window, with the file offset of
        // its first byte. Empty whenever the current line started inside
        // the current window.
        let mut carry: Vec<u8> = Vec::new();
        let mut carry_offset: u64 = 0;

        let mut map_start: u64 = 0;
        while map_start < file_len {
            let remaining = file_len - map_start;
            let win_len = remaining.min(max_window) as usize;
            let at_eof = map_start + win_len as u64 == file_len;
            let window = MappedWindow::map(&file, map_start, win_len)?;
            let bytes = window.bytes();
            tracing::trace!(map_start, win_len, at_eof, "window mapped");

            let mut scanner = WindowScanner::new(bytes, terms, at_eof);
            while let Some(span) = scanner.next_span() {
                if span.start == 0 && !carry.is_empty() {
                    // First terminator of this window closes the carried line.
                    carry.extend_from_slice(&bytes[..span.end]);
                    let line = build_line(&mut decoder, &carry, carry_offset)?;
                    carry.clear();
                    deliver(&line)?;
                } else {
                    let line = build_line(
                        &mut decoder,
                        &bytes[span.start..span.end],
                        map_start + span.start as u64,
                    )?;
                    deliver(&line)?;
                }
            }

            let line_start = scanner.line_start();
            if at_eof {
                // Trailing line with no terminator, if any bytes remain.
                let tail = &bytes[line_start..];
                if !carry.is_empty() {
                    carry.extend_from_slice(tail);
                    let line = build_line(&mut decoder, &carry, carry_offset)?;
                    carry.clear();
                    deliver(&line)?;
                } else if !tail.is_empty() {
                    let line =
                        build_line(&mut decoder, tail, map_start + line_start as u64)?;
                    deliver(&line)?;
                }
                break;
            }

            if line_start > 0 {
                // Re-scan the unfinished tail (and any unresolved candidate
                // terminator) at the start of the next window.
                map_start += line_start as u64;
            } else {
                // No terminator anywhere in the window: the line is longer
                // than the window. Carry the decided bytes and move past
                // them; an undecided candidate at the edge is left for the
                // next window.
                let decided = scanner.scanned_to();
                if carry.is_empty() {
                    carry_offset = map_start;
                }
                carry.extend_from_slice(&bytes[..decided]);
                map_start += decided as u64;
                tracing::trace!(carry_len = carry.len(), "line exceeds window, carrying");
            }
        }

        tracing::debug!(lines = lines_emitted, "scan finished");
        Ok(())
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

fn build_line(decoder: &mut LineDecoder, bytes: &[u8], offset: u64) -> Result<Line> {
    let byte_len =
        u32::try_from(bytes.len()).map_err(|_| ParseError::LineTooLong { offset })?;
    let content = decoder.decode(bytes, offset)?;
    Ok(Line::new(offset, byte_len, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_unbounded() {
        assert_eq!(LineParser::new().max_window_size(), u64::MAX);
        assert_eq!(LineParser::default().max_window_size(), u64::MAX);
    }

    #[test]
    fn test_window_size_builder() {
        let parser = LineParser::new().with_max_window_size(4096);
        assert_eq!(parser.max_window_size(), 4096);
    }
}
