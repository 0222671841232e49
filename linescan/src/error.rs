//! Error types for line parsing

use std::io;

/// Errors surfaced by a file scan. Every variant is fatal: the scan stops at
/// the failure point and no lines after it are delivered.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed {encoding} input in the line starting at byte offset {offset}")]
    MalformedInput {
        /// File offset of the first byte of the undecodable line.
        offset: u64,
        /// Name of the active encoding.
        encoding: &'static str,
    },

    #[error("unsupported encoding {name}: CR/LF are not context-free byte sequences")]
    UnsupportedEncoding { name: &'static str },

    #[error("line starting at byte offset {offset} is longer than a line length can represent")]
    LineTooLong { offset: u64 },

    #[error("line callback failed")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
