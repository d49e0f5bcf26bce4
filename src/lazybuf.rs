//! The output sink: stays referencing the original input until the first
//! divergence forces a copy, matching spec.md §3's lazy buffer and §9's
//! "true zero-allocation path for the no-match case."
//!
//! Grounded on the original `lazyBuffer` in `main.go` (a `*bytes.Buffer`
//! that is `nil` until first write) and the teacher's `Emitter` trait in
//! `src/emit.rs`; unlike either, this version resolves into a borrowed
//! `Cow` rather than always allocating a fresh `String`, so `redact` can
//! return `Cow::Borrowed(input)` on the no-match path with zero copies.

use std::borrow::Cow;

pub(crate) enum LazyBuf<'a> {
    Untouched(&'a str),
    Owned(String),
}

impl<'a> LazyBuf<'a> {
    pub(crate) fn new(original: &'a str) -> Self {
        LazyBuf::Untouched(original)
    }

    /// Force materialization, copying `original[..up_to]` as the owned
    /// buffer's starting content. A no-op if already materialized.
    pub(crate) fn materialize(&mut self, original: &'a str, up_to: usize) {
        if let LazyBuf::Untouched(_) = self {
            *self = LazyBuf::Owned(original[..up_to].to_string());
        }
    }

    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, LazyBuf::Owned(_))
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        if let LazyBuf::Owned(buf) = self {
            buf.push_str(s);
        }
    }

    pub(crate) fn push_char(&mut self, c: char) {
        if let LazyBuf::Owned(buf) = self {
            buf.push(c);
        }
    }

    pub(crate) fn into_cow(self, original: &'a str) -> Cow<'a, str> {
        match self {
            LazyBuf::Untouched(_) => Cow::Borrowed(original),
            LazyBuf::Owned(s) => Cow::Owned(s),
        }
    }
}
