//! The streaming redact walker (component D of spec.md §2): a single
//! forward pass over the scanner's event stream that keeps the
//! automaton's active node aligned with the current JSON path, decides
//! per value whether to copy, descend, or substitute, and assembles the
//! output into a [`LazyBuf`].
//!
//! Grounded on `main.go`'s `redactingListener` (the `path` stack of
//! `redactingListenerState`, the `skipMatching` propagation, and the
//! "materialize on first accepting key" rule) translated from a
//! listener callback style into an explicit loop over pull events, per
//! spec.md §9's "stack versus recursion" design note.
//!
//! One correction versus a literal reading of spec.md §4.D: that section
//! says a frame is marked `skip` when its node is "accepting OR empty".
//! Marking `skip` for an *empty* (no-possible-match) node would suppress
//! output for an entirely unrelated subtree, silently deleting bytes
//! outside any redacted region — contradicting spec.md §1's
//! byte-identical-outside-matches invariant and spec.md §8's own scenario
//! 2 (the untouched `"c":116` sibling). The original source agrees:
//! `main.go`'s `EnterObject` only ORs `skipMatching` with `isTerminal`
//! (accepting), never with "no states left". This walker does the same:
//! `skip` is set only by acceptance (own or inherited); an empty node's
//! `step` calls simply keep returning empty nodes at near-zero cost, which
//! is all the "pruning" spec.md's design note is really after.

use std::borrow::Cow;

use crate::automaton::{Automaton, Node};
use crate::error::RedactError;
use crate::lazybuf::LazyBuf;
use crate::scanner::{Event, Scanner};
use crate::trace::Tracer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Object,
    Array,
}

struct Frame {
    /// The node active on entry to this frame; used to step children.
    node: Node,
    /// Set by `MemberKey`, consumed by the following value/container event.
    /// Only ever populated for [`FrameKind::Object`] frames.
    pending_child: Option<(Node, String)>,
    /// Suppress all output for this frame's content: either this frame's
    /// own node was accepting on entry, or an ancestor's was.
    skip: bool,
    /// `true` iff *this* frame (not an ancestor) is the one whose node was
    /// accepting on entry — the one responsible for emitting the
    /// transformed replacement when it closes.
    own_accepting: bool,
    /// Offset of this container's opening bracket, for slicing its raw
    /// text when `own_accepting`.
    start_offset: usize,
    kind: FrameKind,
    /// Next array index to assign; unused for `FrameKind::Object`.
    array_index: usize,
    /// Whether entering this frame pushed a path segment onto the tracer
    /// (false only for the document's root container, which has none).
    has_traced_segment: bool,
}

pub(crate) struct Walker<'a, T: ?Sized> {
    input: &'a str,
    automaton: &'a Automaton,
    transform: &'a T,
    scanner: Scanner<'a>,
    buf: LazyBuf<'a>,
    stack: Vec<Frame>,
    tracer: Tracer,
}

impl<'a, T> Walker<'a, T>
where
    T: Fn(&str) -> String + ?Sized,
{
    pub(crate) fn new(
        input: &'a str,
        automaton: &'a Automaton,
        transform: &'a T,
        scanner: Scanner<'a>,
        enable_match_trace: bool,
    ) -> Self {
        Self {
            input,
            automaton,
            transform,
            scanner,
            buf: LazyBuf::new(input),
            stack: Vec::new(),
            tracer: Tracer::new(enable_match_trace),
        }
    }

    pub(crate) fn run(mut self) -> Result<(Cow<'a, str>, Vec<crate::trace::MatchTraceEntry>), RedactError> {
        // The position right after the last emitted event, i.e. before the
        // scanner's own end-of-document lookahead silently swallows any
        // trailing whitespace while deciding there's nothing left to yield.
        // `scanner.pos()` read only after the loop below would already be
        // past that whitespace, with nothing having copied it anywhere.
        let mut consumed = 0;
        while let Some(event) = self.scanner.next_event()? {
            self.handle_event(event);
            consumed = self.scanner.pos();
        }
        // Bytes after the root value (trailing whitespace, typically) are
        // never wrapped in an event; copy them through verbatim once the
        // buffer has diverged, or they fall out of the input unchanged.
        if self.buf.is_owned() {
            self.buf.push_str(&self.input[consumed..]);
        }
        Ok((self.buf.into_cow(self.input), self.tracer.into_entries()))
    }

    fn handle_event(&mut self, event: Event<'a>) {
        match event {
            Event::EnterObject { offset } => self.enter_container(offset, FrameKind::Object, '{'),
            Event::EnterArray { offset } => self.enter_container(offset, FrameKind::Array, '['),
            Event::ExitObject { offset } => self.exit_container(offset, '}'),
            Event::ExitArray { offset } => self.exit_container(offset, ']'),
            Event::MemberKey { raw, offset } => self.member_key(raw, offset),
            Event::Value { raw, offset, .. } => self.value(raw, offset),
            Event::Comma { .. } => {
                if self.stack.last().is_none_or(|f| !f.skip) {
                    self.buf.push_char(',');
                }
            }
        }
    }

    /// Compute the node and path segment a non-root child position steps
    /// to, consuming the parent frame's bookkeeping (the pending key for
    /// objects, the running counter for arrays).
    fn child_step(&mut self) -> (Node, String) {
        let frame = self.stack.last_mut().expect("child_step called at root");
        match frame.kind {
            FrameKind::Object => frame
                .pending_child
                .take()
                .expect("member_key always precedes an object value"),
            FrameKind::Array => {
                let idx = frame.array_index;
                frame.array_index += 1;
                let segment = idx.to_string();
                let next = self.automaton.step(&frame.node, &segment);
                (next, segment)
            }
        }
    }

    fn enter_container(&mut self, offset: usize, kind: FrameKind, open: char) {
        if self.stack.is_empty() {
            // The root container is never matched as a whole: there is no
            // segment leading to it.
            self.buf.push_char(open);
            self.stack.push(Frame {
                node: self.automaton.start_node(),
                pending_child: None,
                skip: false,
                own_accepting: false,
                start_offset: offset,
                kind,
                array_index: 0,
                has_traced_segment: false,
            });
            return;
        }

        let (node, segment) = self.child_step();
        let parent_skip = self.stack.last().unwrap().skip;
        let accepting = node.accepting();
        if accepting {
            self.buf.materialize(self.input, offset);
        }
        self.tracer.push_segment(&segment);
        let skip = accepting || parent_skip;
        if !skip {
            self.buf.push_char(open);
        }
        self.stack.push(Frame {
            node,
            pending_child: None,
            skip,
            own_accepting: accepting,
            start_offset: offset,
            kind,
            array_index: 0,
            has_traced_segment: true,
        });
    }

    fn exit_container(&mut self, offset: usize, close: char) {
        let frame = self.stack.pop().expect("exit_container without matching enter");
        if frame.own_accepting {
            let raw = &self.input[frame.start_offset..=offset];
            let replacement = (self.transform)(raw);
            self.buf.push_char('"');
            self.buf.push_str(&replacement);
            self.buf.push_char('"');
            self.tracer.record_match(frame.start_offset);
        } else if !frame.skip {
            self.buf.push_char(close);
        }
        if frame.has_traced_segment {
            self.tracer.pop_segment();
        }
    }

    fn member_key(&mut self, raw: &'a str, offset: usize) {
        // Strip the surrounding quotes without unescaping, matching the
        // original's `ctx.key[1:len(ctx.key)-1]` (main.go).
        let key_text = &raw[1..raw.len() - 1];
        let frame = self.stack.last_mut().expect("member_key outside an object");
        let next = self.automaton.step(&frame.node, key_text);
        let accepting = next.accepting();
        if accepting {
            self.buf.materialize(self.input, offset);
        }
        let skip = frame.skip;
        frame.pending_child = Some((next, key_text.to_string()));
        if !skip {
            self.buf.push_str(raw);
            self.buf.push_char(':');
        }
    }

    fn value(&mut self, raw: &'a str, offset: usize) {
        let Some(frame) = self.stack.last() else {
            // A bare scalar document: nothing can match it.
            self.buf.push_str(raw);
            return;
        };
        let frame_skip = frame.skip;
        let (next, segment) = self.child_step();
        let accepting = next.accepting();

        if accepting {
            self.tracer.push_segment(&segment);
            if !frame_skip {
                self.buf.materialize(self.input, offset);
                let replacement = (self.transform)(raw);
                self.buf.push_char('"');
                self.buf.push_str(&replacement);
                self.buf.push_char('"');
                self.tracer.record_match(offset);
            }
            self.tracer.pop_segment();
        } else if !frame_skip {
            self.buf.push_str(raw);
        }
    }
}
