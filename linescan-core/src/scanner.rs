//! Byte-level newline scanning over one mapped window
//!
//! The scanner walks a window's bytes and yields the byte span of each
//! completed line, leaving decoding and callback dispatch to the caller. It
//! performs no I/O and no allocation, so the same logic serves any window
//! source.
//!
//! Matching follows three rules at each position: a full CR match greedily
//! probes for a following LF (CRLF counts as a single terminator); a failed
//! CR match falls through to an LF attempt at the same position before the
//! scan advances; a partial multi-byte mismatch advances the position by
//! exactly one byte past the start of the failed match.
//!
//! Near the end of a window that is not at end-of-file, a candidate position
//! can be *undecidable*: the window cannot hold the full sequence (or the
//! CRLF probe) that would settle what the terminator is. The scanner then
//! stops without consuming, so a terminator is never split across two
//! windows; the caller re-maps from the last confirmed line start. At
//! end-of-file there are no further bytes and every position is decidable.

use crate::terminator::TerminatorBytes;

/// Byte span of one completed line within a window, terminator excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    /// Window-relative offset of the first content byte.
    pub start: usize,
    /// Window-relative offset one past the last content byte.
    pub end: usize,
}

impl LineSpan {
    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the line has no content bytes.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Outcome of probing for one terminator sequence at a fixed position.
enum SeqMatch {
    /// All sequence bytes matched.
    Yes,
    /// The window holds enough bytes and they differ.
    No,
    /// The window ends before the sequence could complete.
    NeedMore,
}

fn match_seq(window: &[u8], at: usize, seq: &[u8], at_eof: bool) -> SeqMatch {
    match window.get(at..at + seq.len()) {
        Some(bytes) if bytes == seq => SeqMatch::Yes,
        Some(_) => SeqMatch::No,
        // Out of window: at end-of-file no more bytes exist, so the
        // sequence cannot occur; otherwise the position is undecidable.
        None => {
            if at_eof {
                SeqMatch::No
            } else {
                SeqMatch::NeedMore
            }
        }
    }
}

/// Pull-scanner for line terminators over one window of file bytes.
///
/// Repeated [`next_span`](Self::next_span) calls yield completed lines in
/// order. When it returns `None`, [`line_start`](Self::line_start) is the
/// window-relative start of the unfinished line and
/// [`scanned_to`](Self::scanned_to) is where scanning halted — the window
/// length normally, or an undecidable position when the scan stopped early.
#[derive(Debug)]
pub struct WindowScanner<'a> {
    window: &'a [u8],
    terms: TerminatorBytes,
    at_eof: bool,
    pos: usize,
    line_start: usize,
    halted: bool,
}

impl<'a> WindowScanner<'a> {
    /// Start scanning a window. `at_eof` marks a window whose last byte is
    /// the last byte of the file.
    pub fn new(window: &'a [u8], terms: TerminatorBytes, at_eof: bool) -> Self {
        Self {
            window,
            terms,
            at_eof,
            pos: 0,
            line_start: 0,
            halted: false,
        }
    }

    /// The next completed line span in this window, if any.
    pub fn next_span(&mut self) -> Option<LineSpan> {
        if self.halted {
            return None;
        }
        let w = self.window;
        let cr = self.terms.cr();
        let lf = self.terms.lf();
        let (cr0, lf0) = (cr[0], lf[0]);

        while self.pos < w.len() {
            // Skip ordinary content to the next candidate first byte.
            let rel = if cr0 == lf0 {
                memchr::memchr(cr0, &w[self.pos..])
            } else {
                memchr::memchr2(cr0, lf0, &w[self.pos..])
            };
            let p = match rel {
                Some(i) => self.pos + i,
                None => {
                    self.pos = w.len();
                    return None;
                }
            };
            self.pos = p;

            if w[p] == cr0 {
                match match_seq(w, p, cr, self.at_eof) {
                    SeqMatch::Yes => {
                        // Greedy probe: CR immediately followed by LF is one
                        // CRLF terminator, and must not be split, so an
                        // unanswerable probe stops the scan before the CR.
                        return match match_seq(w, p + cr.len(), lf, self.at_eof) {
                            SeqMatch::Yes => self.emit(p, cr.len() + lf.len()),
                            SeqMatch::No => self.emit(p, cr.len()),
                            SeqMatch::NeedMore => self.halt(p),
                        };
                    }
                    SeqMatch::NeedMore => return self.halt(p),
                    SeqMatch::No => {}
                }
            }
            if w[p] == lf0 {
                match match_seq(w, p, lf, self.at_eof) {
                    SeqMatch::Yes => return self.emit(p, lf.len()),
                    SeqMatch::NeedMore => return self.halt(p),
                    SeqMatch::No => {}
                }
            }
            // Partial mismatch: one byte past the start of the failed match.
            self.pos = p + 1;
        }
        None
    }

    /// Window-relative start of the line no terminator has closed yet.
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Position scanning halted at: the window length, or the undecidable
    /// position when the scan stopped early.
    pub fn scanned_to(&self) -> usize {
        self.pos
    }

    fn emit(&mut self, end: usize, terminator_len: usize) -> Option<LineSpan> {
        let span = LineSpan {
            start: self.line_start,
            end,
        };
        self.line_start = end + terminator_len;
        self.pos = self.line_start;
        Some(span)
    }

    fn halt(&mut self, at: usize) -> Option<LineSpan> {
        self.halted = true;
        self.pos = at;
        None
    }
}
