#![no_std]

//! Linescan Core - Line Scanning and Character View Definitions
//!
//! This crate holds the pure logic half of the line parser: encoded
//! terminator sequences, the window scanner that finds line boundaries in
//! raw bytes, and the zero-copy character views that carry decoded line
//! content. It performs no I/O; mapping, decoding and orchestration live in
//! the `linescan` crate.
//!
//! The scanner and terminator types are allocation-free; the view and line
//! types need the `alloc` feature (enabled by default).

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod scanner;
pub mod terminator;

#[cfg(feature = "alloc")]
pub mod line;
#[cfg(feature = "alloc")]
pub mod view;

pub use scanner::{LineSpan, WindowScanner};
pub use terminator::{TerminatorBytes, MAX_TERMINATOR_LEN};

#[cfg(feature = "alloc")]
pub use line::Line;
#[cfg(feature = "alloc")]
pub use view::CharView;
