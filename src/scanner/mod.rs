//! A strict, zero-copy, pull-based JSON event scanner.
//!
//! Plays the role spec.md §1 calls a "thin collaborator... any compliant
//! JSON scanner may be used; this spec does not prescribe its internal
//! structure." Structurally it's the teacher's recursive-descent
//! `src/parser/{object,array,lex,strings,number}.rs` split, but turned
//! inside-out into a pull iterator: instead of recursing into nested
//! containers, it keeps an explicit `Vec<Container>` stack and a single
//! `Pending` resume state, so the caller (the redact walker) can interleave
//! its own stack-based bookkeeping one event at a time without the scanner
//! ever holding a borrow of the walker or vice versa.

mod lex;
mod number;
mod strings;

use crate::error::{ScanError, ScanErrorKind};
use crate::options::ScannerOptions;

/// The JSON value-type tag carried by a scalar [`Event::Value`], per
/// spec.md §6 ("type tag (object, array, string, number)") — expanded to
/// cover `Bool`/`Null` since a conventional scanner classifies every JSON
/// value type, not just the four spec.md names explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Bool,
    Null,
}

/// One SAX-style parse event, carrying the byte offset at which its token
/// begins (spec.md §6: "errors: an error value with byte offset...";
/// "member_key: ... the byte offset of the key in the input").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    EnterObject { offset: usize },
    ExitObject { offset: usize },
    EnterArray { offset: usize },
    ExitArray { offset: usize },
    /// `raw` includes the surrounding quotes.
    MemberKey { raw: &'a str, offset: usize },
    /// A scalar value. Object/array values are instead reported as
    /// `EnterObject`/`EnterArray` — the container's own enter/exit pair
    /// doubles as its "value" event, since spec.md's walker table treats
    /// "the popped frame was accepting" as how a whole container gets
    /// redacted (spec.md §4.D, `exit_object`/`exit_array` row).
    Value {
        raw: &'a str,
        kind: ValueKind,
        offset: usize,
    },
    Comma { offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    /// Read a value next: root value, an array element, or (after a key
    /// and its colon) an object member's value.
    Value,
    /// Just pushed a container; check for the immediate-close case before
    /// falling into reading members/elements.
    ContainerOpened,
    /// Inside an object, expect a key (or, only right after `{`, `}`).
    Key,
    /// A key was just read; expect `:` then a value.
    AfterKey,
    /// A value (scalar or nested container) just finished; decide comma
    /// vs. close vs. (if the stack is empty) end of document.
    AfterValue,
    Done,
}

/// Pull-based JSON scanner over a `&str` slice. Call [`Scanner::next_event`]
/// until it returns `Ok(None)`.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    opts: ScannerOptions,
    stack: Vec<Container>,
    pending: Pending,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, opts: ScannerOptions) -> Self {
        Self {
            input,
            pos: 0,
            opts,
            stack: Vec::new(),
            pending: Pending::Value,
        }
    }

    /// The current scan position. Valid to call between `next_event` calls;
    /// used by the walker to locate the divergence point for its lazy
    /// buffer.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn next_event(&mut self) -> Result<Option<Event<'a>>, ScanError> {
        loop {
            match self.pending {
                Pending::Done => return Ok(None),
                Pending::Value => {
                    if let Some(ev) = self.read_value()? {
                        return Ok(Some(ev));
                    }
                }
                Pending::ContainerOpened => self.resolve_container_open()?,
                Pending::Key => {
                    if let Some(ev) = self.read_key()? {
                        return Ok(Some(ev));
                    }
                }
                Pending::AfterKey => self.consume_colon()?,
                Pending::AfterValue => {
                    if let Some(ev) = self.resolve_after_value()? {
                        return Ok(Some(ev));
                    }
                }
            }
        }
    }

    fn skip_ws(&mut self) -> Result<(), ScanError> {
        lex::skip_ws_and_comments(self.input, &mut self.pos, &self.opts)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Read a value at the current position: dispatches to container
    /// open, or scans a scalar token and returns its `Value` event.
    fn read_value(&mut self) -> Result<Option<Event<'a>>, ScanError> {
        self.skip_ws()?;
        let offset = self.pos;
        match self.peek() {
            Some(b'{') => {
                self.pos += 1;
                self.stack.push(Container::Object);
                self.pending = Pending::ContainerOpened;
                Ok(Some(Event::EnterObject { offset }))
            }
            Some(b'[') => {
                self.pos += 1;
                self.stack.push(Container::Array);
                self.pending = Pending::ContainerOpened;
                Ok(Some(Event::EnterArray { offset }))
            }
            Some(b'"') => {
                let end = strings::scan_string(self.input, self.pos)?;
                let raw = &self.input[self.pos..end];
                self.pos = end;
                self.pending = Pending::AfterValue;
                Ok(Some(Event::Value {
                    raw,
                    kind: ValueKind::String,
                    offset,
                }))
            }
            Some(b'-' | b'0'..=b'9') => {
                let end = number::scan_number(self.input, self.pos)?;
                let raw = &self.input[self.pos..end];
                self.pos = end;
                self.pending = Pending::AfterValue;
                Ok(Some(Event::Value {
                    raw,
                    kind: ValueKind::Number,
                    offset,
                }))
            }
            Some(b't') => self.expect_literal("true", ValueKind::Bool, offset),
            Some(b'f') => self.expect_literal("false", ValueKind::Bool, offset),
            Some(b'n') => self.expect_literal("null", ValueKind::Null, offset),
            Some(c) => Err(ScanError::new(
                ScanErrorKind::UnexpectedChar(c as char),
                offset,
            )),
            None => Err(ScanError::new(ScanErrorKind::UnexpectedEnd, offset)),
        }
    }

    fn expect_literal(
        &mut self,
        lit: &'static str,
        kind: ValueKind,
        offset: usize,
    ) -> Result<Option<Event<'a>>, ScanError> {
        if self.input[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            self.pending = Pending::AfterValue;
            Ok(Some(Event::Value {
                raw: &self.input[offset..self.pos],
                kind,
                offset,
            }))
        } else {
            Err(ScanError::new(
                ScanErrorKind::UnexpectedChar(self.input[self.pos..].chars().next().unwrap()),
                offset,
            ))
        }
    }

    /// Right after `{` or `[`: decide whether the container is empty.
    fn resolve_container_open(&mut self) -> Result<(), ScanError> {
        self.skip_ws()?;
        match self.stack.last().copied() {
            Some(Container::Object) => {
                self.pending = if self.peek() == Some(b'}') {
                    Pending::AfterValue
                } else {
                    Pending::Key
                };
            }
            Some(Container::Array) => {
                self.pending = if self.peek() == Some(b']') {
                    Pending::AfterValue
                } else {
                    Pending::Value
                };
            }
            None => unreachable!("ContainerOpened with an empty stack"),
        }
        Ok(())
    }

    fn read_key(&mut self) -> Result<Option<Event<'a>>, ScanError> {
        self.skip_ws()?;
        let offset = self.pos;
        if self.peek() != Some(b'"') {
            return Err(ScanError::new(ScanErrorKind::ObjectKeyExpected, offset));
        }
        let end = strings::scan_string(self.input, self.pos)?;
        let raw = &self.input[self.pos..end];
        self.pos = end;
        self.pending = Pending::AfterKey;
        Ok(Some(Event::MemberKey { raw, offset }))
    }

    fn consume_colon(&mut self) -> Result<(), ScanError> {
        self.skip_ws()?;
        if self.peek() != Some(b':') {
            return Err(ScanError::new(ScanErrorKind::ColonExpected, self.pos));
        }
        self.pos += 1;
        self.pending = Pending::Value;
        Ok(())
    }

    fn resolve_after_value(&mut self) -> Result<Option<Event<'a>>, ScanError> {
        self.skip_ws()?;
        let Some(top) = self.stack.last().copied() else {
            if self.pos < self.input.len() {
                return Err(ScanError::new(ScanErrorKind::TrailingContent, self.pos));
            }
            self.pending = Pending::Done;
            return Ok(None);
        };

        let (comma_next, close_byte) = match top {
            Container::Object => (Pending::Key, b'}'),
            Container::Array => (Pending::Value, b']'),
        };

        match self.peek() {
            Some(b',') => {
                let offset = self.pos;
                self.pos += 1;
                self.skip_ws()?;
                if self.opts.allow_trailing_commas && self.peek() == Some(close_byte) {
                    // Trailing comma tolerated: swallow it and fall straight
                    // into the close, without emitting a dangling Comma
                    // event for a member that doesn't exist.
                    self.pending = Pending::AfterValue;
                    return Ok(None);
                }
                self.pending = comma_next;
                Ok(Some(Event::Comma { offset }))
            }
            Some(c) if c == close_byte => {
                let offset = self.pos;
                self.pos += 1;
                self.stack.pop();
                self.pending = Pending::AfterValue;
                Ok(Some(match top {
                    Container::Object => Event::ExitObject { offset },
                    Container::Array => Event::ExitArray { offset },
                }))
            }
            Some(c) => Err(ScanError::new(
                ScanErrorKind::UnexpectedChar(c as char),
                self.pos,
            )),
            None => Err(ScanError::new(ScanErrorKind::UnexpectedEnd, self.pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Vec<Event<'_>> {
        let mut s = Scanner::new(input, ScannerOptions::default());
        let mut out = Vec::new();
        while let Some(ev) = s.next_event().expect("scan ok") {
            out.push(ev);
        }
        out
    }

    #[test]
    fn scans_flat_object() {
        let evs = events(r#"{"a":1,"b":2}"#);
        assert_eq!(
            evs,
            vec![
                Event::EnterObject { offset: 0 },
                Event::MemberKey {
                    raw: "\"a\"",
                    offset: 1
                },
                Event::Value {
                    raw: "1",
                    kind: ValueKind::Number,
                    offset: 5
                },
                Event::Comma { offset: 6 },
                Event::MemberKey {
                    raw: "\"b\"",
                    offset: 7
                },
                Event::Value {
                    raw: "2",
                    kind: ValueKind::Number,
                    offset: 11
                },
                Event::ExitObject { offset: 12 },
            ]
        );
    }

    #[test]
    fn scans_array_of_scalars() {
        let evs = events(r#"[1,"two",true,null]"#);
        assert_eq!(evs.len(), 4 * 2 - 1 + 2); // 4 values, 3 commas, enter+exit
        assert!(matches!(evs[0], Event::EnterArray { offset: 0 }));
        assert!(matches!(evs.last(), Some(Event::ExitArray { .. })));
    }

    #[test]
    fn nested_object_in_array() {
        let evs = events(r#"[{"k":1}]"#);
        assert!(matches!(evs[0], Event::EnterArray { .. }));
        assert!(matches!(evs[1], Event::EnterObject { .. }));
        assert!(matches!(evs[2], Event::MemberKey { .. }));
    }

    #[test]
    fn empty_object_and_array() {
        assert_eq!(
            events("{}"),
            vec![
                Event::EnterObject { offset: 0 },
                Event::ExitObject { offset: 1 }
            ]
        );
        assert_eq!(
            events("[]"),
            vec![
                Event::EnterArray { offset: 0 },
                Event::ExitArray { offset: 1 }
            ]
        );
    }

    #[test]
    fn rejects_trailing_comma_by_default() {
        let mut s = Scanner::new("[1,]", ScannerOptions::default());
        let mut last = Ok(None);
        loop {
            last = s.next_event();
            if !matches!(last, Ok(Some(_))) {
                break;
            }
        }
        assert!(last.is_err());
    }

    #[test]
    fn tolerates_trailing_comma_when_enabled() {
        let opts = ScannerOptions {
            allow_trailing_commas: true,
            ..Default::default()
        };
        let mut s = Scanner::new("[1,]", opts);
        let mut out = Vec::new();
        while let Some(ev) = s.next_event().expect("scan ok") {
            out.push(ev);
        }
        assert_eq!(
            out,
            vec![
                Event::EnterArray { offset: 0 },
                Event::Value {
                    raw: "1",
                    kind: ValueKind::Number,
                    offset: 1
                },
                Event::ExitArray { offset: 3 },
            ]
        );
    }

    #[test]
    fn tolerates_comments_when_enabled() {
        let opts = ScannerOptions {
            allow_comments: true,
            ..Default::default()
        };
        let mut s = Scanner::new("{ // c\n\"a\":1}", opts);
        let mut out = Vec::new();
        while let Some(ev) = s.next_event().expect("scan ok") {
            out.push(ev);
        }
        assert!(matches!(out[0], Event::EnterObject { .. }));
        assert!(matches!(out[1], Event::MemberKey { .. }));
    }

    #[test]
    fn rejects_trailing_content_after_root_value() {
        let mut s = Scanner::new("1 2", ScannerOptions::default());
        let first = s.next_event();
        assert!(first.is_ok());
        let second = s.next_event();
        assert!(second.is_err());
    }

    #[test]
    fn scans_booleans_and_null() {
        let evs = events("true");
        assert_eq!(
            evs,
            vec![Event::Value {
                raw: "true",
                kind: ValueKind::Bool,
                offset: 0
            }]
        );
        let evs = events("null");
        assert_eq!(
            evs,
            vec![Event::Value {
                raw: "null",
                kind: ValueKind::Null,
                offset: 0
            }]
        );
    }
}
