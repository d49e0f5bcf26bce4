//! Ambient configuration surface, mirroring the teacher's `Options` +
//! `Default` shape in `src/options.rs`.

/// Leniency knobs for the scanner. `false`/strict by default; enabling
/// either is the one place this crate inherits behavior from its
/// teacher's JSON-repair heritage, scoped down to "tolerate, don't
/// rewrite" (the scanner still never emits repaired bytes — it just
/// skips over comments/trailing commas without copying them out).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerOptions {
    /// Tolerate `//` and `/* */` comments between tokens.
    pub allow_comments: bool,
    /// Tolerate a single trailing comma before `}` or `]`.
    pub allow_trailing_commas: bool,
}

/// Construction-time options for a [`crate::Redactor`]. Immutable once
/// passed to [`crate::Redactor::with_options`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RedactorOptions {
    /// When `true`, malformed input makes `redact` return a [`crate::RedactError`]
    /// instead of the spec-mandated default of passing the input through
    /// unchanged (spec.md §7).
    pub strict_on_malformed_input: bool,
    /// Scanner leniency toggles.
    pub scanner: ScannerOptions,
    /// When `true`, `redact_with_trace` records one [`crate::trace::MatchTraceEntry`]
    /// per redacted value instead of discarding match positions.
    pub enable_match_trace: bool,
}

impl Default for RedactorOptions {
    fn default() -> Self {
        Self {
            strict_on_malformed_input: false,
            scanner: ScannerOptions::default(),
            enable_match_trace: false,
        }
    }
}
