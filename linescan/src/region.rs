//! Mapped file windows
//!
//! One window is one read-only memory mapping of a file region. The mapping
//! is owned by a value whose `Drop` unmaps it, so release is deterministic
//! and happens on every exit path — the scan loop drops each window before
//! mapping the next one or returning an error.

use std::fs::File;
use std::io;

use memmap2::{Mmap, MmapOptions};

/// A read-only mapping of `len` bytes of a file starting at `offset`.
pub(crate) struct MappedWindow {
    map: Mmap,
}

impl MappedWindow {
    /// Map a window of `file`. `len` must be non-zero and `offset + len`
    /// must not pass the end of the file.
    ///
    /// Arbitrary offsets are fine: the mapping layer aligns them to the
    /// platform page size internally.
    pub(crate) fn map(file: &File, offset: u64, len: usize) -> io::Result<Self> {
        // SAFETY: the mapping is read-only and private to this scan, and
        // the file handle outlives it. As with any file-backed mapping,
        // truncation of the file by another process during the scan is
        // undefined behavior the caller must rule out.
        let map = unsafe { MmapOptions::new().offset(offset).len(len).map(file)? };
        Ok(Self { map })
    }

    /// The mapped bytes.
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_window_exposes_region_bytes() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"0123456789").unwrap();
        tmp.flush().unwrap();

        let file = File::open(tmp.path()).unwrap();
        let window = MappedWindow::map(&file, 3, 4).unwrap();
        assert_eq!(window.bytes(), b"3456");
    }

    #[test]
    fn test_windows_can_overlap() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"abcdef").unwrap();
        tmp.flush().unwrap();

        let file = File::open(tmp.path()).unwrap();
        let first = MappedWindow::map(&file, 0, 4).unwrap();
        let second = MappedWindow::map(&file, 2, 4).unwrap();
        assert_eq!(first.bytes(), b"abcd");
        assert_eq!(second.bytes(), b"cdef");
    }
}
