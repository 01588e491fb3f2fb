//! This crate provides a backtracking regular expression engine with capture
//! groups, backreferences and counted repetition.
//!
//! A [`Regex`] is compiled once into an immutable node graph. Matching always
//! considers the *whole* subject: `a+` matches `"aaa"` but not `"baaa"`. There is
//! no substring search.
//!
//! ```
//! use regexpy::Regex;
//!
//! let re = Regex::new(r"(\d+)-(\d+)").unwrap();
//! assert!(re.matches("2010-03"));
//! assert!(!re.matches("2010-03!"));
//!
//! let caps = re.captures("2010-03").unwrap();
//! assert_eq!(caps.get(1), Some("2010"));
//! assert_eq!(&caps[2], "03");
//! ```
//!
//! # Reusing matchers
//!
//! [`Regex::matches`] builds a throwaway [`Matcher`] on every call. When matching
//! many subjects, build a matcher once with [`Regex::matcher`] and reuse it; it
//! resets itself before each match. Matchers built from the same `Regex` share
//! its graph and may run concurrently, each on its own thread.
//!
//! ```
//! use regexpy::Regex;
//!
//! let re = Regex::new("a*(b|c)").unwrap();
//! let mut m1 = re.matcher();
//! let mut m2 = re.matcher();
//! assert!(m1.matches("ab"));
//! assert!(m2.matches("b"));
//! assert!(!m1.matches("bb"));
//! ```
//!
//! # Syntax
//!
//! | Construct | Meaning |
//! |---|---|
//! | `x` | the character itself |
//! | `.` | any one character |
//! | `[abc]` `[a-z]` `[^a-z]` | a character class, optionally negated |
//! | `\d \D \s \S` | digit, non-digit, whitespace (`\r \n \t \f` and space), non-whitespace |
//! | `\N` | the text last captured by group `N` |
//! | `\x` | `x` taken literally, for any other `x` |
//! | `(...)` | a capturing group, numbered by its `(` from 1 |
//! | `a\|b` | alternation within the enclosing group |
//! | `? * +` | zero or one, zero or more, one or more |
//! | `{m}` `{m,}` `{m,n}` | counted repetition |
//! | `^ $` | start and end of the subject |
//!
//! Inside a class, `]` is literal when it comes first, and `-` is literal when
//! it comes first or last. Escapes inside a class are always literal.
//!
//! # Untrusted input
//!
//! This is a backtracking engine. Nested unbounded repetitions over ambiguous
//! alternatives, like `(a|a)*b`, take exponential time on subjects that almost
//! match. Don't run patterns from untrusted sources.
//!
//! # Crate features
//!
//! * **logging** - Emit `debug` and `trace` messages through the `log` crate.

#![deny(missing_docs)]

use std::fmt;
use std::ops::{Index, Range};
use std::str::FromStr;
use std::sync::Arc;

use regexpy_graph::{Compiler, Config, Graph};

pub use regexpy_graph::{Error, ErrorKind, Matcher, Span};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// A compiled regular expression.
///
/// Cloning a `Regex` is cheap: the compiled graph is reference counted.
#[derive(Clone)]
pub struct Regex {
    pattern: Arc<str>,
    graph: Arc<Graph>,
}

impl Regex {
    /// Compile a regular expression with the default limits.
    ///
    /// Returns an error describing the first syntax problem in `pattern`,
    /// together with its offset.
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        RegexBuilder::new(pattern).build()
    }

    /// Return true if and only if the whole of `subject` matches.
    ///
    /// This allocates a fresh [`Matcher`] for the call.
    pub fn matches(&self, subject: &str) -> bool {
        self.matcher().matches(subject)
    }

    /// Return a new matcher sharing this regex's graph.
    pub fn matcher(&self) -> Matcher {
        Matcher::new(Arc::clone(&self.graph))
    }

    /// Match the whole of `subject` and return its capture groups, or
    /// `None` if it doesn't match.
    pub fn captures<'h>(&self, subject: &'h str) -> Option<Captures<'h>> {
        let mut matcher = self.matcher();
        if !matcher.matches(subject) {
            return None;
        }
        let spans = (0..=self.group_count()).map(|id| matcher.group(id)).collect();
        Some(Captures::new(subject, spans))
    }

    /// The number of parenthesized groups, not counting the implicit group 0.
    pub fn group_count(&self) -> usize {
        self.graph.group_count()
    }

    /// The pattern this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The compiled node graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl fmt::Display for Regex {
    /// Shows the original regular expression.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for Regex {
    /// Shows the original regular expression.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Regex").field(&self.as_str()).finish()
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to parse a string into a regular expression
    fn from_str(s: &str) -> Result<Regex, Error> {
        Regex::new(s)
    }
}

/// A configurable builder for a [`Regex`].
#[derive(Clone, Debug)]
pub struct RegexBuilder {
    pattern: String,
    config: Config,
}

impl RegexBuilder {
    /// Create a new builder for `pattern` with the default limits.
    pub fn new(pattern: &str) -> RegexBuilder {
        RegexBuilder { pattern: pattern.to_string(), config: Config::new() }
    }

    /// Compile the pattern.
    pub fn build(&self) -> Result<Regex, Error> {
        let mut compiler = Compiler::new();
        compiler.configure(self.config.clone());
        let graph = compiler.compile(&self.pattern)?;
        Ok(Regex { pattern: Arc::from(self.pattern.as_str()), graph: Arc::new(graph) })
    }

    /// Set the deepest permitted nesting of groups. Defaults to `250`.
    pub fn nest_limit(&mut self, limit: u32) -> &mut RegexBuilder {
        self.config = self.config.clone().nest_limit(limit);
        self
    }

    /// Set the largest permitted number of nodes in the compiled graph.
    /// Defaults to `1 << 20`.
    pub fn size_limit(&mut self, limit: usize) -> &mut RegexBuilder {
        self.config = self.config.clone().size_limit(limit);
        self
    }
}

/// The capture groups of one successful match.
///
/// Group 0 is the whole subject. A group that took no part in the match is
/// `None`.
#[derive(Clone, Debug)]
pub struct Captures<'h> {
    subject: &'h str,
    spans: Vec<Option<Span>>,
    /// The byte offset of every char boundary, including the end.
    boundaries: Vec<usize>,
}

#[allow(clippy::len_without_is_empty)]
impl<'h> Captures<'h> {
    fn new(subject: &'h str, spans: Vec<Option<Span>>) -> Captures<'h> {
        let boundaries = subject
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(subject.len()))
            .collect();
        Captures { subject, spans, boundaries }
    }

    /// The text captured by group `i`.
    pub fn get(&self, i: usize) -> Option<&'h str> {
        self.byte_range(i).map(|range| &self.subject[range])
    }

    /// The char offsets captured by group `i`.
    pub fn span(&self, i: usize) -> Option<Span> {
        self.spans.get(i).copied().flatten()
    }

    /// The byte offsets captured by group `i`.
    pub fn byte_range(&self, i: usize) -> Option<Range<usize>> {
        let range = self.span(i)?.range()?;
        Some(self.boundaries[range.start]..self.boundaries[range.end])
    }

    /// The number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Iterate over every group, in order, starting with group 0.
    pub fn iter<'c>(&'c self) -> impl Iterator<Item = Option<&'h str>> + 'c {
        (0..self.len()).map(move |i| self.get(i))
    }
}

impl<'h> Index<usize> for Captures<'h> {
    type Output = str;

    /// # Panics
    ///
    /// If group `i` didn't take part in the match.
    fn index(&self, i: usize) -> &str {
        self.get(i).unwrap_or_else(|| panic!("no group at index '{}'", i))
    }
}
