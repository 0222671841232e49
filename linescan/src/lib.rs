//! Linescan - Memory-Mapped Line Parsing
//!
//! This library scans a file line by line and hands each line to a callback
//! with its byte offset in the file, its byte length, and its decoded
//! content — without reading the whole file onto the heap and without
//! copying decoded characters more than once. It suits callers that need
//! line boundaries and metadata as much as the text, such as building line
//! indexes over very large files.
//!
//! ## Architecture
//!
//! The work is split across two crates:
//!
//! - **linescan-core**: pure scanning logic and zero-copy character views
//!   (`no_std`, no I/O)
//! - **linescan**: memory mapping, character decoding, and the scan driver
//!
//! The file is mapped in bounded windows (whole-file by default), each
//! window is scanned for CR, LF and CRLF terminators in the bytes of the
//! caller's encoding, and each line's bytes are decoded into a
//! [`CharView`] — a shared-backing view whose sub-slices never copy.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linescan::{encoding_rs::UTF_8, LineParser};
//!
//! fn main() -> linescan::Result<()> {
//!     LineParser::new().for_each("app.log", UTF_8, |line| {
//!         println!("{:>8}  {:>5}  {}", line.offset(), line.byte_len(), line.content());
//!     })?;
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **One callback per line**, in file order, terminator excluded from
//!   offset, length and content
//! - **Window-size independence**: any `max_window_size` yields the same
//!   lines, even when lines are longer than the window
//! - **Deterministic unmapping**: at most one window is mapped at a time,
//!   released before the next mapping or any error return
//! - **No silent data repair**: undecodable bytes fail the scan instead of
//!   being replaced or skipped

// Re-export the core scanning and view types
pub use linescan_core::{CharView, Line, LineSpan, TerminatorBytes, WindowScanner};

// The encoding values callers pass in (UTF_8, WINDOWS_1252, ...)
pub use encoding_rs;

pub mod error;

mod decoder;
mod parser;
mod region;

pub use error::{ParseError, Result};
pub use parser::LineParser;
