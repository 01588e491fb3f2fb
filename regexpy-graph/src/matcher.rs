use std::sync::Arc;

use crate::backtrack;
use crate::context::MatchContext;
use crate::graph::Graph;
use crate::span::Span;

/// A matcher that runs a compiled [`Graph`] against whole subject strings.
///
/// The graph is shared and never mutated, so any number of matchers may be
/// built from one graph and used at the same time, including from different
/// threads. Each matcher owns its own match context, which is why
/// [`Matcher::matches`] takes `&mut self`: one matcher runs one match at a
/// time, and is reset before each one.
#[derive(Clone, Debug)]
pub struct Matcher {
    graph: Arc<Graph>,
    context: MatchContext,
}

impl Matcher {
    /// Create a new matcher for the given graph.
    pub fn new(graph: Arc<Graph>) -> Self {
        let context = MatchContext::new(&graph);
        Self { graph, context }
    }

    /// Check if the entire subject matches.
    pub fn matches(&mut self, subject: &str) -> bool {
        backtrack::execute(&self.graph, &mut self.context, subject)
    }

    /// The span captured by group `id` in the last successful match, in
    /// `char` offsets. Group 0 is the whole subject.
    ///
    /// Returns `None` if the last match failed, no match has run yet, or the
    /// group took no part in the match.
    pub fn group(&self, id: usize) -> Option<Span> {
        self.context.group(id)
    }

    /// The number of parenthesized groups, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.graph.group_count()
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }
}
