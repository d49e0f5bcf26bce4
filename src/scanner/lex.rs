//! Whitespace and (optional) comment skipping.
//!
//! Grounded on the teacher's `src/parser/lex.rs::skip_ws_and_comments`: a
//! `memchr`-accelerated scan for comment terminators, ASCII whitespace
//! handled byte-by-byte. Unlike the teacher, comments are only tolerated
//! when [`crate::options::ScannerOptions::allow_comments`] opts in, and an
//! unterminated block comment is a scan error rather than "runs to EOF".

use crate::error::{ScanError, ScanErrorKind};
use crate::options::ScannerOptions;
use memchr::{memchr, memchr2};

/// Advance `pos` past ASCII whitespace and, if enabled, `//` / `/* */`
/// comments. `input` is the whole document; `pos` is a byte offset into it.
pub(crate) fn skip_ws_and_comments(
    input: &str,
    pos: &mut usize,
    opts: &ScannerOptions,
) -> Result<(), ScanError> {
    loop {
        let bytes = input.as_bytes();
        while *pos < bytes.len() && matches!(bytes[*pos], b' ' | b'\t' | b'\n' | b'\r') {
            *pos += 1;
        }
        if !opts.allow_comments || *pos >= bytes.len() {
            return Ok(());
        }
        if input[*pos..].starts_with("//") {
            let rest = &input[*pos + 2..];
            match memchr2(b'\n', b'\r', rest.as_bytes()) {
                Some(nl) => *pos += 2 + nl + 1,
                None => *pos = input.len(),
            }
            continue;
        }
        if input[*pos..].starts_with("/*") {
            let rest = &input[*pos + 2..];
            match find_block_comment_end(rest) {
                Some(star) => *pos += 2 + star + 2,
                None => return Err(ScanError::new(ScanErrorKind::UnexpectedEnd, *pos)),
            }
            continue;
        }
        return Ok(());
    }
}

/// Finds the byte offset of the `*` in the closing `*/` of a block comment.
fn find_block_comment_end(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut offset = 0usize;
    while let Some(p) = memchr(b'*', &bytes[offset..]) {
        let idx = offset + p;
        if bytes.get(idx + 1) == Some(&b'/') {
            return Some(idx);
        }
        offset = idx + 1;
    }
    None
}
