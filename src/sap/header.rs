//! Header segment extraction.
//!
//! A SAP file starts with a block of CR LF separated text lines and switches to
//! binary payload after the first `0xFF 0xFF` pair. Only the text block is of
//! interest for indexing.

use std::path::Path;

use memchr::memmem;
use tracing::trace;

use super::error::{HeaderError, Result};

/// Marks the end of the textual header and the start of the binary payload.
pub const HEADER_SENTINEL: &[u8] = &[0xFF, 0xFF];

/// Read a file and return the bytes preceding the header sentinel.
///
/// When the sentinel is missing the whole file is treated as header.
pub fn read_header(path: &Path) -> Result<Vec<u8>> {
    let mut buf = std::fs::read(path).map_err(|source| HeaderError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let header_len = split_header(&buf).len();
    trace!(
        "header of {} is {}/{} bytes",
        path.display(),
        header_len,
        buf.len()
    );
    buf.truncate(header_len);
    Ok(buf)
}

/// The in-memory half of [`read_header`].
pub fn split_header(buf: &[u8]) -> &[u8] {
    match memmem::find(buf, HEADER_SENTINEL) {
        Some(end) => &buf[..end],
        None => buf,
    }
}
