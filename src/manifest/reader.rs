// src/manifest/reader.rs

//! Line-oriented manifest reading.
//!
//! [`read_line`] returns lines with the trailing `\n` removed; [`split_fields`]
//! cuts a line at every comma, keeping empty fields.

use std::io::{self, BufRead};

/// Read the next line from `reader`, without its trailing newline.
///
/// Returns `Ok(None)` at end of input. A final line without a newline is
/// still returned. Invalid UTF-8 is replaced rather than rejected.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Split a manifest line into its comma-separated fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split(',').collect()
}

/// `#` in the first column.
pub fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}

/// Empty or ASCII whitespace only.
pub fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_whitespace() || b == b'\x0b')
}
