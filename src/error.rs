//! Error types. The scanner reports [`ScanError`] with a byte offset and a
//! reason, matching spec.md §6's parser error contract; [`RedactError`]
//! is the crate's top-level error, surfaced only in strict mode (see
//! [`crate::options::RedactorOptions::strict_on_malformed_input`]).
//!
//! Grounded in the teacher's `src/error.rs` (`RepairErrorKind` + position),
//! rebuilt on `thiserror` since that dependency was already declared but
//! unused by the teacher.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("expected an object key")]
    ObjectKeyExpected,
    #[error("expected ':'")]
    ColonExpected,
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number literal")]
    InvalidNumber,
    #[error("trailing content after the root value")]
    TrailingContent,
}

/// A scanner failure, tagged with the byte offset it occurred at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte offset {offset}")]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub offset: usize,
}

impl ScanError {
    pub fn new(kind: ScanErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// The crate's top-level error. Only reachable via
/// [`crate::Redactor::try_redact`] (strict mode); the default `redact` call
/// never fails, passing malformed input through unchanged per spec.md §7.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedactError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}
