//! Redact values out of JSON text by dot-separated path pattern, without
//! parsing into a DOM and without allocating when nothing in a given
//! document matches.
//!
//! ```
//! use jsonredact::Redactor;
//!
//! let redactor = Redactor::new(
//!     ["user.ssn", "user.cards.#.number"],
//!     |raw: &str| format!("REDACTED({} bytes)", raw.len()),
//! );
//!
//! let input = r#"{"user":{"ssn":"123-45-6789","cards":[{"number":"4111"}]}}"#;
//! let output = redactor.redact(input);
//! assert!(output.contains("REDACTED"));
//! assert!(!output.contains("123-45-6789"));
//! ```
//!
//! A pattern segment is either a literal, `#` (matches exactly one
//! segment), or `*` (matches zero or more segments); `.` inside a literal
//! is written `\.`. See [`segment::split_expression`] and
//! [`automaton::Automaton`] for the matching semantics.

pub mod automaton;
pub mod error;
pub mod options;
pub mod scanner;
pub mod segment;
pub mod trace;
mod lazybuf;
mod walker;

pub use error::{RedactError, ScanError, ScanErrorKind};
pub use options::{RedactorOptions, ScannerOptions};
pub use scanner::{Event, Scanner, ValueKind};
pub use trace::MatchTraceEntry;

use std::borrow::Cow;
use std::sync::Arc;

use automaton::Automaton;
use walker::Walker;

/// A compiled set of path patterns plus a transform, ready to redact any
/// number of JSON documents.
///
/// Cheap to share across threads: cloning a `Redactor` only bumps the
/// transform's `Arc` refcount and copies the (small) compiled automaton's
/// state arena, and a shared `&Redactor` needs no external synchronization
/// since `redact` takes `&self`.
#[derive(Clone)]
pub struct Redactor {
    automaton: Arc<Automaton>,
    patterns_empty: bool,
    transform: Arc<dyn Fn(&str) -> String + Send + Sync>,
    options: RedactorOptions,
}

impl Redactor {
    /// Build a redactor from a list of patterns and a transform applied to
    /// the raw (still-quoted-if-a-string) text of every matched value.
    ///
    /// An empty pattern list compiles to an automaton that matches nothing;
    /// [`Redactor::redact`] then returns the input unchanged without
    /// invoking the scanner at all.
    pub fn new<I, S, F>(patterns: I, transform: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::with_options(patterns, transform, RedactorOptions::default())
    }

    /// As [`Redactor::new`], with explicit [`RedactorOptions`].
    pub fn with_options<I, S, F>(patterns: I, transform: F, options: RedactorOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let patterns_empty = patterns.is_empty();
        let automaton = Automaton::build(&patterns);
        Self {
            automaton: Arc::new(automaton),
            patterns_empty,
            transform: Arc::new(transform),
            options,
        }
    }

    /// Redact `input`, returning the input borrowed unchanged when nothing
    /// matched — the zero-allocation path — or an owned, rebuilt string
    /// otherwise.
    ///
    /// Malformed JSON is passed through unchanged regardless of
    /// [`RedactorOptions::strict_on_malformed_input`]; use [`Redactor::try_redact`]
    /// to observe that option and get the parse error back.
    pub fn redact<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.try_redact(input)
            .unwrap_or(Cow::Borrowed(input))
    }

    /// As [`Redactor::redact`], but returns `Err` on malformed JSON when
    /// [`RedactorOptions::strict_on_malformed_input`] is set; otherwise
    /// behaves like `redact` and always returns `Ok`.
    pub fn try_redact<'a>(&self, input: &'a str) -> Result<Cow<'a, str>, RedactError> {
        match self.run(input) {
            Ok((out, _)) => Ok(out),
            Err(err) if self.options.strict_on_malformed_input => Err(err),
            Err(_) => {
                tracing::warn!("malformed input passed through unredacted");
                Ok(Cow::Borrowed(input))
            }
        }
    }

    /// As [`Redactor::try_redact`], additionally returning one
    /// [`MatchTraceEntry`] per redacted value when
    /// [`RedactorOptions::enable_match_trace`] is set (an empty `Vec`
    /// otherwise).
    pub fn redact_with_trace<'a>(
        &self,
        input: &'a str,
    ) -> Result<(Cow<'a, str>, Vec<MatchTraceEntry>), RedactError> {
        match self.run(input) {
            Ok(result) => Ok(result),
            Err(err) if self.options.strict_on_malformed_input => Err(err),
            Err(_) => {
                tracing::warn!("malformed input passed through unredacted");
                Ok((Cow::Borrowed(input), Vec::new()))
            }
        }
    }

    fn run<'a>(&self, input: &'a str) -> Result<(Cow<'a, str>, Vec<MatchTraceEntry>), RedactError> {
        let span = tracing::debug_span!("redact", input_len = input.len());
        let _guard = span.enter();

        if self.patterns_empty {
            return Ok((Cow::Borrowed(input), Vec::new()));
        }

        let scanner = Scanner::new(input, self.options.scanner);
        let walker = Walker::new(
            input,
            &self.automaton,
            self.transform.as_ref(),
            scanner,
            self.options.enable_match_trace,
        );
        walker.run()
    }
}

impl std::fmt::Debug for Redactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redactor").field("options", &self.options).finish_non_exhaustive()
    }
}
