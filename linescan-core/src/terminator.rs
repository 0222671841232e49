//! Encoded line terminator definitions
//!
//! Line terminators are matched at the byte level, so the CR and LF sequences
//! must be expressed in the bytes of the active character encoding before
//! scanning starts. Single-byte and ASCII-compatible encodings use one byte
//! per terminator; two-byte encodings such as UTF-16 use two.

/// Maximum byte length of one encoded CR or LF sequence.
pub const MAX_TERMINATOR_LEN: usize = 2;

/// The encoded CR and LF byte sequences for one character encoding.
///
/// A CRLF terminator is always the CR sequence immediately followed by the
/// LF sequence, so only the two single terminators are stored. The sequences
/// are fixed for an entire scan and held inline without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminatorBytes {
    cr: [u8; MAX_TERMINATOR_LEN],
    cr_len: u8,
    lf: [u8; MAX_TERMINATOR_LEN],
    lf_len: u8,
}

impl TerminatorBytes {
    /// Create terminator sequences from encoded CR and LF bytes.
    ///
    /// # Panics
    ///
    /// Panics if either sequence is empty or longer than
    /// [`MAX_TERMINATOR_LEN`]; sequences are produced by the encoding layer
    /// and an out-of-range length is a caller bug.
    pub fn new(cr: &[u8], lf: &[u8]) -> Self {
        assert!(
            !cr.is_empty() && cr.len() <= MAX_TERMINATOR_LEN,
            "encoded CR must be 1..={MAX_TERMINATOR_LEN} bytes, got {}",
            cr.len()
        );
        assert!(
            !lf.is_empty() && lf.len() <= MAX_TERMINATOR_LEN,
            "encoded LF must be 1..={MAX_TERMINATOR_LEN} bytes, got {}",
            lf.len()
        );
        let mut cr_buf = [0u8; MAX_TERMINATOR_LEN];
        cr_buf[..cr.len()].copy_from_slice(cr);
        let mut lf_buf = [0u8; MAX_TERMINATOR_LEN];
        lf_buf[..lf.len()].copy_from_slice(lf);
        Self {
            cr: cr_buf,
            cr_len: cr.len() as u8,
            lf: lf_buf,
            lf_len: lf.len() as u8,
        }
    }

    /// Terminators for ASCII-compatible encodings: `\r` and `\n` as one byte each.
    pub const fn ascii() -> Self {
        Self {
            cr: [b'\r', 0],
            cr_len: 1,
            lf: [b'\n', 0],
            lf_len: 1,
        }
    }

    /// The encoded CR sequence.
    pub fn cr(&self) -> &[u8] {
        &self.cr[..self.cr_len as usize]
    }

    /// The encoded LF sequence.
    pub fn lf(&self) -> &[u8] {
        &self.lf[..self.lf_len as usize]
    }

    /// Byte length of an encoded CRLF, the longest terminator.
    pub fn crlf_len(&self) -> usize {
        (self.cr_len + self.lf_len) as usize
    }
}

impl Default for TerminatorBytes {
    fn default() -> Self {
        Self::ascii()
    }
}
