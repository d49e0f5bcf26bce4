//! The path-pattern automaton: compiles a set of expressions into a graph
//! of states and answers, at each path segment, which states remain
//! reachable and whether any of them accept.
//!
//! Grounded on `ndfa.go` (`node`, `state`, `build`, `(*node).next`): one
//! state machine per expression, a `Node` tracking the product of their
//! currently active states, and a `#` self-loop modelling recursive
//! descent (`*`). States live in an arena (`Vec<StateNode>`) addressed by
//! `StateId`, per spec.md §9's "stable identity... arena of states plus
//! integer handles" design note — this is what lets the `*` self-loop be a
//! plain `StateId` rather than a reference-counted cycle.

use crate::segment::{Segment, split_expression};

/// A handle into a [`Automaton`]'s state arena. Cheap to copy, stable for
/// the automaton's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(u32);

const WILDCARD_KEY: &str = "#";

#[derive(Debug)]
struct StateNode {
    accepting: bool,
    /// Exact-segment transitions, including the self-loop used by `*`
    /// (keyed `#`) and literal escaped-reserved-character segments
    /// (keyed `\#` / `\*`).
    transitions: Vec<(Segment, StateId)>,
}

impl StateNode {
    fn new() -> Self {
        Self {
            accepting: false,
            transitions: Vec::new(),
        }
    }

    fn transition_for(&self, key: &str) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|(seg, _)| seg == key)
            .map(|(_, id)| *id)
    }
}

/// The compiled form of a whole pattern set: one state arena shared by all
/// expressions, plus the list of each expression's start state.
#[derive(Debug)]
pub struct Automaton {
    arena: Vec<StateNode>,
    starts: Vec<StateId>,
}

impl Automaton {
    /// Compile a set of patterns. An empty `patterns` slice yields an
    /// automaton whose [`Node::is_empty`] start node matches nothing,
    /// mirroring spec.md §6: "If `patterns` is empty, return `input`
    /// unchanged with no parsing" (checked by the caller before even
    /// constructing a scanner).
    pub fn build(patterns: &[String]) -> Self {
        let mut arena = Vec::new();
        let mut starts = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let segments = split_expression(pattern);
            let start = build_chain(&mut arena, &segments);
            starts.push(start);
        }
        Self { arena, starts }
    }

    /// True if this automaton was compiled from an empty pattern list and
    /// so can never accept anything.
    pub fn matches_nothing(&self) -> bool {
        self.starts.is_empty()
    }

    /// The node every redact call begins walking from.
    pub fn start_node(&self) -> Node {
        Node {
            states: self.starts.clone(),
            accepting: false,
        }
    }

    fn state(&self, id: StateId) -> &StateNode {
        &self.arena[id.0 as usize]
    }

    /// Compute the successor node reached by consuming path segment `key`
    /// from `node`. `key` is the literal text of an object member key or an
    /// array index rendered as a decimal string.
    ///
    /// For each active state: a literal transition is preferred over the
    /// single-level-wildcard (`#`) transition, and both may fire (the
    /// spec's "collect successors" — duplicates are allowed since a state
    /// can be reached by more than one route, only the accepting-ness of
    /// the union matters).
    pub fn step(&self, node: &Node, key: &str) -> Node {
        let mut states = Vec::with_capacity(node.states.len());
        let mut accepting = false;

        let literal_key: std::borrow::Cow<'_, str> = if key == "#" || key == "*" {
            std::borrow::Cow::Owned(format!("\\{key}"))
        } else {
            std::borrow::Cow::Borrowed(key)
        };

        for &id in &node.states {
            let st = self.state(id);
            if let Some(next) = st.transition_for(&literal_key) {
                accepting |= self.state(next).accepting;
                states.push(next);
            }
            if literal_key != WILDCARD_KEY {
                if let Some(next) = st.transition_for(WILDCARD_KEY) {
                    accepting |= self.state(next).accepting;
                    states.push(next);
                }
            }
        }

        Node { states, accepting }
    }
}

/// The walker's per-depth snapshot of all active automaton states across
/// every compiled expression.
#[derive(Debug, Clone)]
pub struct Node {
    states: Vec<StateId>,
    accepting: bool,
}

impl Node {
    pub fn accepting(&self) -> bool {
        self.accepting
    }

    /// True once no active state can reach any accepting path; the walker
    /// uses this to mark a frame as skipped without writing output for it.
    pub fn is_dead(&self) -> bool {
        self.states.is_empty()
    }
}

/// Build one expression's state chain into `arena`, returning its start
/// state. Mirrors `build` in `ndfa.go`.
fn build_chain(arena: &mut Vec<StateNode>, segments: &[Segment]) -> StateId {
    if segments.is_empty() {
        return push_accepting(arena);
    }

    // A pattern whose only segment is the bare recursive-descent marker
    // with nothing after it is ambiguous in the original; this crate
    // resolves it (spec.md Open Question) as "matches nothing": compile
    // to a dead end with no accepting state and no outgoing transitions.
    if segments.len() == 1 && segments[0] == "*" {
        return push_dead_end(arena);
    }

    if segments[0] == "*" {
        let self_loop = push_empty(arena);
        let tail_start = build_chain(arena, &segments[2..]);
        let literal = segments[1].clone();
        let node = &mut arena[self_loop.0 as usize];
        node.transitions.push((WILDCARD_KEY.to_string(), self_loop));
        node.transitions.push((literal, tail_start));
        self_loop
    } else {
        let next = build_chain(arena, &segments[1..]);
        let here = push_empty(arena);
        arena[here.0 as usize]
            .transitions
            .push((segments[0].clone(), next));
        here
    }
}

fn push_empty(arena: &mut Vec<StateNode>) -> StateId {
    let id = StateId(arena.len() as u32);
    arena.push(StateNode::new());
    id
}

fn push_accepting(arena: &mut Vec<StateNode>) -> StateId {
    let id = StateId(arena.len() as u32);
    arena.push(StateNode {
        accepting: true,
        transitions: Vec::new(),
    });
    id
}

fn push_dead_end(arena: &mut Vec<StateNode>) -> StateId {
    push_empty(arena)
}
