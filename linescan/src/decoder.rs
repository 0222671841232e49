//! Character decoding for line content
//!
//! Each line's bytes are decoded independently: the decode always passes
//! "end of input" because a line cannot end mid-character — a terminator
//! sits between it and the next byte, and the last line ends at end-of-file.
//! The scratch buffer is reused across lines and doubled whenever a line
//! overflows it, retrying that line's decode from the start with fresh
//! decoder state.
//!
//! BOM bytes receive no special treatment and decode as ordinary content,
//! so a leading U+FEFF shows up in the first line.

use encoding_rs::{DecoderResult, Encoding, UTF_16BE, UTF_16LE};
use linescan_core::{CharView, TerminatorBytes};

use crate::error::{ParseError, Result};

/// Derive the encoded CR and LF byte sequences for `encoding`.
///
/// ASCII-compatible encodings — everything in the Encoding Standard except
/// UTF-16 and the stateful ISO-2022-JP — encode `\r` and `\n` as the single
/// bytes `0x0D` and `0x0A`. The UTF-16 variants are decode-only (their
/// encoder would produce UTF-8 bytes), so their two-byte sequences are
/// written out directly. Anything else has no context-free byte form for a
/// terminator and is rejected before any I/O happens.
pub(crate) fn derive_terminators(encoding: &'static Encoding) -> Result<TerminatorBytes> {
    if encoding == UTF_16LE {
        Ok(TerminatorBytes::new(&[0x0D, 0x00], &[0x0A, 0x00]))
    } else if encoding == UTF_16BE {
        Ok(TerminatorBytes::new(&[0x00, 0x0D], &[0x00, 0x0A]))
    } else if encoding.is_ascii_compatible() {
        Ok(TerminatorBytes::ascii())
    } else {
        Err(ParseError::UnsupportedEncoding {
            name: encoding.name(),
        })
    }
}

/// Decodes line byte ranges into retainable character views.
pub(crate) struct LineDecoder {
    encoding: &'static Encoding,
    scratch: Vec<u16>,
}

impl LineDecoder {
    /// Starting scratch capacity in code units.
    const INITIAL_UNITS: usize = 2048;

    pub(crate) fn new(encoding: &'static Encoding) -> Self {
        Self {
            encoding,
            scratch: vec![0u16; Self::INITIAL_UNITS],
        }
    }

    /// Decode one line's bytes. `offset` is the file position of `bytes[0]`,
    /// reported on malformed input.
    ///
    /// The decoded units are copied once into the view's shared backing, so
    /// the view stays valid while the scratch buffer moves on to the next
    /// line.
    pub(crate) fn decode(&mut self, bytes: &[u8], offset: u64) -> Result<CharView> {
        if bytes.is_empty() {
            return Ok(CharView::empty());
        }
        loop {
            let mut decoder = self.encoding.new_decoder_without_bom_handling();
            let (result, _read, written) =
                decoder.decode_to_utf16_without_replacement(bytes, &mut self.scratch, true);
            match result {
                DecoderResult::InputEmpty => {
                    return Ok(CharView::from_units(&self.scratch[..written]));
                }
                DecoderResult::OutputFull => {
                    // Retry the whole line in a larger buffer; partial
                    // decoder state is never carried across attempts.
                    let doubled = self.scratch.len() * 2;
                    self.scratch.resize(doubled, 0);
                }
                DecoderResult::Malformed(_, _) => {
                    return Err(ParseError::MalformedInput {
                        offset,
                        encoding: self.encoding.name(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{ISO_2022_JP, REPLACEMENT, UTF_8, WINDOWS_1252};

    #[test]
    fn test_ascii_compatible_terminators() {
        for encoding in [UTF_8, WINDOWS_1252] {
            let terms = derive_terminators(encoding).unwrap();
            assert_eq!(terms.cr(), b"\r");
            assert_eq!(terms.lf(), b"\n");
        }
    }

    #[test]
    fn test_utf16_terminators() {
        let le = derive_terminators(UTF_16LE).unwrap();
        assert_eq!(le.cr(), &[0x0D, 0x00]);
        assert_eq!(le.lf(), &[0x0A, 0x00]);

        let be = derive_terminators(UTF_16BE).unwrap();
        assert_eq!(be.cr(), &[0x00, 0x0D]);
        assert_eq!(be.lf(), &[0x00, 0x0A]);
    }

    #[test]
    fn test_stateful_encodings_rejected() {
        for encoding in [REPLACEMENT, ISO_2022_JP] {
            assert!(matches!(
                derive_terminators(encoding),
                Err(ParseError::UnsupportedEncoding { .. })
            ));
        }
    }

    #[test]
    fn test_decode_utf8() {
        let mut decoder = LineDecoder::new(UTF_8);
        let view = decoder.decode("héllo".as_bytes(), 0).unwrap();
        assert_eq!(view.to_text(), "héllo");
    }

    #[test]
    fn test_decode_empty_slice() {
        let mut decoder = LineDecoder::new(UTF_8);
        let view = decoder.decode(b"", 0).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn test_decode_windows_1252_high_bytes() {
        let mut decoder = LineDecoder::new(WINDOWS_1252);
        let view = decoder.decode(&[0xE9, 0x20, 0x80], 0).unwrap();
        // 0xE9 is é, 0x80 is the euro sign in windows-1252
        assert_eq!(view.to_text(), "é €");
    }

    #[test]
    fn test_decode_utf16le() {
        let mut decoder = LineDecoder::new(UTF_16LE);
        let view = decoder.decode(&[0x68, 0x00, 0x69, 0x00], 0).unwrap();
        assert_eq!(view.to_text(), "hi");
    }

    #[test]
    fn test_malformed_input_reports_line_offset() {
        let mut decoder = LineDecoder::new(UTF_8);
        let err = decoder.decode(&[b'a', 0xFF, b'b'], 96).unwrap_err();
        match err {
            ParseError::MalformedInput { offset, encoding } => {
                assert_eq!(offset, 96);
                assert_eq!(encoding, "UTF-8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_utf16_unit_is_malformed() {
        let mut decoder = LineDecoder::new(UTF_16LE);
        assert!(matches!(
            decoder.decode(&[0x68, 0x00, 0x69], 0),
            Err(ParseError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_long_line_grows_scratch_and_recovers() {
        let mut decoder = LineDecoder::new(UTF_8);
        let long = "x".repeat(LineDecoder::INITIAL_UNITS * 3 + 7);
        let view = decoder.decode(long.as_bytes(), 0).unwrap();
        assert_eq!(view.len(), long.len());
        assert_eq!(view.to_text(), long);

        // The grown scratch keeps serving subsequent small lines.
        let small = decoder.decode(b"ok", 0).unwrap();
        assert_eq!(small.to_text(), "ok");
    }

    #[test]
    fn test_bom_bytes_are_content() {
        let mut decoder = LineDecoder::new(UTF_8);
        let view = decoder.decode(b"\xEF\xBB\xBFabc", 0).unwrap();
        assert_eq!(view.to_text(), "\u{FEFF}abc");
    }
}
