//! A backtracking regular expression engine built around an explicit node graph.
//!
//! A pattern is compiled once, in a single left to right scan, into a [`Graph`]:
//! a directed and possibly cyclic graph of typed nodes (literals, classes, group
//! boundaries, backreferences, counted repetitions, anchors) stored in one
//! arena. The graph is immutable after compilation. A [`Matcher`] pairs a shared
//! graph with its own match context and decides whether a subject string
//! matches the pattern *as a whole*; there is no substring search.
//!
//! ```
//! use std::sync::Arc;
//! use regexpy_graph::{compile, Matcher, Span};
//!
//! let graph = Arc::new(compile(r"(a|b)\1c*").unwrap());
//! let mut matcher = Matcher::new(graph);
//! assert!(matcher.matches("bbcc"));
//! assert_eq!(matcher.group(1), Some(Span::new(0, 1)));
//! assert!(!matcher.matches("abc"));
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
//! All quantifiers are greedy. Offsets reported by [`Span`] count `char`s.
//!
//! # Crate features
//!
//! * **logging** - Emit `debug` and `trace` messages through the `log` crate
//!   while compiling and matching.

#![deny(missing_debug_implementations)]

#[macro_use]
mod macros;

mod backtrack;
mod compiler;
mod context;
mod cursor;
mod error;
mod graph;
mod matcher;
mod span;

pub use crate::compiler::{Compiler, Config};
pub use crate::error::{CompileResult, Error, ErrorKind};
pub use crate::graph::{
    CharClass, ClassRange, Graph, Node, NodeId, NodeKind, Repetition,
};
pub use crate::matcher::Matcher;
pub use crate::span::Span;

/// Compile `pattern` with the default [`Config`].
pub fn compile(pattern: &str) -> CompileResult<Graph> {
    Compiler::new().compile(pattern)
}
