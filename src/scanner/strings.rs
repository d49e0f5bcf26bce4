//! Strict JSON string literal scanning.
//!
//! Grounded on the teacher's `src/parser/strings.rs` byte-scan loop
//! (track an `escape` flag, advance by `ch.len_utf8()`), but validating
//! every escape per RFC 8259 instead of tolerating arbitrary ones — this
//! scanner rejects what the teacher's repair engine would silently accept.

use crate::error::{ScanError, ScanErrorKind};

/// Scan a `"`-delimited string literal starting at `input[start]` (which
/// must be `"`). Returns the exclusive end offset (one past the closing
/// quote).
pub(crate) fn scan_string(input: &str, start: usize) -> Result<usize, ScanError> {
    debug_assert_eq!(input.as_bytes().get(start), Some(&b'"'));
    let bytes = input.as_bytes();
    let mut i = start + 1;
    loop {
        let Some(&b) = bytes.get(i) else {
            return Err(ScanError::new(ScanErrorKind::UnexpectedEnd, i));
        };
        match b {
            b'"' => return Ok(i + 1),
            b'\\' => {
                i = scan_escape(input, i)?;
            }
            0x00..=0x1F => {
                return Err(ScanError::new(
                    ScanErrorKind::UnexpectedChar(b as char),
                    i,
                ));
            }
            _ => {
                let ch = input[i..].chars().next().unwrap();
                i += ch.len_utf8();
            }
        }
    }
}

/// `input[pos]` is the `\` of an escape sequence; returns the offset just
/// past the whole sequence.
fn scan_escape(input: &str, pos: usize) -> Result<usize, ScanError> {
    let bytes = input.as_bytes();
    match bytes.get(pos + 1) {
        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(pos + 2),
        Some(b'u') => {
            let hex = input
                .get(pos + 2..pos + 6)
                .ok_or_else(|| ScanError::new(ScanErrorKind::InvalidUnicodeEscape, pos))?;
            if hex.len() == 4 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                Ok(pos + 6)
            } else {
                Err(ScanError::new(ScanErrorKind::InvalidUnicodeEscape, pos))
            }
        }
        Some(_) | None => Err(ScanError::new(ScanErrorKind::InvalidEscape, pos)),
    }
}
