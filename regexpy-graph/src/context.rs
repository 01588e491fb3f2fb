use std::collections::HashSet;

use crate::graph::{Graph, NodeId};
use crate::span::Span;

/// The mutable state of a match attempt.
///
/// A context belongs to exactly one match in progress. It holds the capture
/// table (a stack of spans per group, since a quantified group can be
/// entered many times), the record of which nodes are being tried at which
/// offsets, the pass counters of repetition nodes and the backtracking work
/// stack. All of it is cleared before each attempt, so one context can be
/// reused for any number of sequential matches against the same graph.
#[derive(Clone, Debug, Default)]
pub(crate) struct MatchContext {
    pub(crate) haystack: Vec<char>,
    pub(crate) groups: Vec<Vec<Span>>,
    /// The `(node, offset)` pairs on the current path. Only as large as the
    /// path is deep.
    pub(crate) visited: HashSet<(NodeId, usize)>,
    pub(crate) counters: Vec<u32>,
    pub(crate) stack: Vec<Frame>,
}

impl MatchContext {
    /// Create a context sized for `graph`.
    pub fn new(graph: &Graph) -> MatchContext {
        let mut context = MatchContext::default();
        context.reset(graph, "");
        context
    }

    /// Forget everything about the previous attempt and prepare for
    /// matching `haystack`.
    pub(crate) fn reset(&mut self, graph: &Graph, haystack: &str) {
        self.haystack.clear();
        self.haystack.extend(haystack.chars());
        self.groups.resize_with(graph.group_count() + 1, Vec::new);
        for stack in self.groups.iter_mut() {
            stack.clear();
        }
        self.visited.clear();
        self.counters.clear();
        self.counters.resize(graph.len(), 0);
        self.stack.clear();
    }

    /// The number of parenthesized groups tracked, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// The most recent instance of group `id`, if it is fully defined.
    pub fn group(&self, id: usize) -> Option<Span> {
        self.groups
            .get(id)
            .and_then(|stack| stack.last())
            .filter(|span| span.is_defined())
            .copied()
    }

    /// Push a new instance of group `id` beginning at `at`.
    pub(crate) fn open_group(&mut self, id: usize, at: usize) {
        self.groups[id].push(Span::starting_at(at));
        self.stack.push(Frame::PopGroup(id));
    }

    /// End the most recent instance of group `id` at `at`. Fails when the
    /// group has no instance to end.
    pub(crate) fn close_group(&mut self, id: usize, at: usize) -> bool {
        match self.groups[id].last_mut() {
            Some(span) => {
                let end = span.replace_end(Some(at));
                self.stack.push(Frame::RestoreEnd { id, end });
                true
            }
            None => false,
        }
    }

    /// Count one more pass over the repetition `id`.
    pub(crate) fn count_pass(&mut self, id: NodeId) -> u32 {
        let count = self.counters[id];
        self.stack.push(Frame::RestoreCounter { id, count });
        self.counters[id] = count.saturating_add(1);
        self.counters[id]
    }

    /// Zero the counter of `id` on the way out of its repetition, so the
    /// next entry counts from scratch.
    pub(crate) fn leave_repeat(&mut self, id: NodeId) {
        let count = self.counters[id];
        self.stack.push(Frame::RestoreCounter { id, count });
        self.counters[id] = 0;
    }

    /// Mark `id` as being tried at `at`. False if it already is, which means
    /// the current path has looped back without consuming anything.
    pub(crate) fn visit(&mut self, id: NodeId, at: usize) -> bool {
        if !self.visited.insert((id, at)) {
            return false;
        }
        self.stack.push(Frame::Unvisit { id, at });
        true
    }

    /// Revert one recorded change.
    pub(crate) fn undo(&mut self, frame: Frame) {
        match frame {
            Frame::PopGroup(id) => {
                self.groups[id].pop();
            }
            Frame::RestoreEnd { id, end } => {
                if let Some(span) = self.groups[id].last_mut() {
                    span.replace_end(end);
                }
            }
            Frame::RestoreCounter { id, count } => self.counters[id] = count,
            Frame::Unvisit { id, at } => {
                self.visited.remove(&(id, at));
            }
            Frame::Step { .. } | Frame::Explore { .. } | Frame::RepeatExit { .. } => {}
        }
    }
}

/// One entry of the backtracking work stack.
///
/// Work frames describe what to try next. Undo frames revert a change when
/// the search unwinds past them, which happens exactly when everything
/// pushed after them has failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Frame {
    /// Enter node `id` at offset `at`.
    Step { id: NodeId, at: usize },
    /// Try successor `index` of `id` at `at`, and the later ones after it.
    Explore { id: NodeId, index: usize, at: usize },
    /// Leave the repetition `id` through `exit` after looping failed.
    RepeatExit { id: NodeId, exit: NodeId, at: usize },
    PopGroup(usize),
    RestoreEnd { id: usize, end: Option<usize> },
    RestoreCounter { id: NodeId, count: u32 },
    Unvisit { id: NodeId, at: usize },
}
