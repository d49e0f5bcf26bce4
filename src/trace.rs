//! Opt-in match diagnostics, the spiritual successor of the teacher's
//! `RepairLogEntry` (`src/parser/mod.rs`'s `Logger`): a flat list of where
//! redaction happened, for a caller that wants to audit a run without
//! re-deriving it from the output.

/// One redacted location, recorded when
/// [`crate::options::RedactorOptions::enable_match_trace`] is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTraceEntry {
    /// Dotted path of the redacted value, e.g. `a.b` or `children.0`.
    pub path: String,
    /// Byte offset in the original input where the redacted value starts.
    pub offset: usize,
}

#[derive(Default)]
pub(crate) struct Tracer {
    enabled: bool,
    path: Vec<String>,
    entries: Vec<MatchTraceEntry>,
}

impl Tracer {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            path: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn push_segment(&mut self, segment: &str) {
        if self.enabled {
            self.path.push(segment.to_string());
        }
    }

    pub(crate) fn pop_segment(&mut self) {
        if self.enabled {
            self.path.pop();
        }
    }

    pub(crate) fn record_match(&mut self, offset: usize) {
        if !self.enabled {
            return;
        }
        self.entries.push(MatchTraceEntry {
            path: self.path.join("."),
            offset,
        });
    }

    pub(crate) fn into_entries(self) -> Vec<MatchTraceEntry> {
        self.entries
    }
}
