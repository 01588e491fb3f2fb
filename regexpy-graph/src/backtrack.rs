//! The backtracking executor.
//!
//! A match attempt is a depth first search over the node graph. Successors are
//! tried in the order their edges were added, and the first path that reaches
//! the terminal node at the end of the subject wins.
//!
//! Instead of recursing, the search keeps its own work stack of [`Frame`]s on
//! the heap. Every state change made on the way down (a group opened or closed,
//! a repetition counted, a node marked as visited) pushes an undo frame, so
//! popping the stack past a failed branch restores exactly the state the branch
//! started from. Deep subjects therefore can't overflow the call stack, while
//! branch order and undo behavior stay the same as in a recursive search.
//!
//! The search is exhaustive, and patterns with nested unbounded repetitions over
//! ambiguous alternatives can take exponential time on inputs that fail to
//! match. Nothing here bounds that.

use crate::context::{Frame, MatchContext};
use crate::graph::{Graph, NodeId, NodeKind};

/// Run `graph` against the whole of `haystack`, using `ctx` for all mutable
/// state.
///
/// On success the capture table in `ctx` describes the accepting path. On
/// failure everything has been unwound and the table is empty.
pub(crate) fn execute(graph: &Graph, ctx: &mut MatchContext, haystack: &str) -> bool {
    ctx.reset(graph, haystack);
    trace!(
        "backtracking over {} chars with a graph of {} nodes",
        ctx.haystack.len(),
        graph.len()
    );
    ctx.stack.push(Frame::Step { id: graph.start(), at: 0 });
    while let Some(frame) = ctx.stack.pop() {
        match frame {
            Frame::Step { id, at } => {
                if step(graph, ctx, id, at) {
                    trace!("matched at node {}", id);
                    return true;
                }
            }
            Frame::Explore { id, index, at } => explore(graph, ctx, id, index, at),
            Frame::RepeatExit { id, exit, at } => {
                ctx.leave_repeat(id);
                ctx.stack.push(Frame::Step { id: exit, at });
            }
            undo => ctx.undo(undo),
        }
    }
    trace!("no match");
    false
}

/// Enter node `id` at offset `at`. Returns true only when the terminal node
/// accepts; otherwise whatever should be tried next has been pushed.
fn step(graph: &Graph, ctx: &mut MatchContext, id: NodeId, at: usize) -> bool {
    let len = ctx.haystack.len();
    if at > len || !ctx.visit(id, at) {
        return false;
    }
    match graph.node(id).kind() {
        NodeKind::Literal(ch) => {
            if ctx.haystack.get(at) == Some(ch) {
                explore(graph, ctx, id, 0, at + 1);
            }
        }
        NodeKind::Wildcard => {
            if at < len {
                explore(graph, ctx, id, 0, at + 1);
            }
        }
        NodeKind::Class(class) => {
            if ctx.haystack.get(at).map_or(false, |&ch| class.matches(ch)) {
                explore(graph, ctx, id, 0, at + 1);
            }
        }
        NodeKind::Empty => explore(graph, ctx, id, 0, at),
        NodeKind::AnchorStart => {
            if at == 0 {
                explore(graph, ctx, id, 0, at);
            }
        }
        NodeKind::AnchorEnd => {
            if at == len {
                explore(graph, ctx, id, 0, at);
            }
        }
        &NodeKind::GroupOpen(group) => {
            ctx.open_group(group, at);
            explore(graph, ctx, id, 0, at);
        }
        &NodeKind::GroupClose(group) => {
            if ctx.close_group(group, at) {
                explore(graph, ctx, id, 0, at);
            }
        }
        NodeKind::Terminal => {
            return ctx.close_group(0, at) && at == len;
        }
        &NodeKind::Backreference(group) => {
            if let Some(end) = recall(ctx, group, at) {
                explore(graph, ctx, id, 0, end);
            }
        }
        NodeKind::Repeat(rep) => {
            let count = ctx.count_pass(id);
            if rep.exceeded(count) {
                return false;
            }
            // Pushed first so that looping again is tried before leaving.
            if rep.satisfied(count) {
                ctx.stack.push(Frame::RepeatExit { id, exit: rep.exit, at });
            }
            if rep.may_loop(count) {
                explore(graph, ctx, id, 0, at);
            }
        }
    }
    false
}

/// Schedule successor `index` of `id` at `at`, keeping a frame around to
/// come back for the successors after it.
fn explore(graph: &Graph, ctx: &mut MatchContext, id: NodeId, index: usize, at: usize) {
    let next = graph.node(id).next();
    if let Some(&succ) = next.get(index) {
        if index + 1 < next.len() {
            ctx.stack.push(Frame::Explore { id, index: index + 1, at });
        }
        ctx.stack.push(Frame::Step { id: succ, at });
    }
}

/// Compare the text most recently captured by `group` with the subject at
/// `at`, returning the offset just past the copy. An open or missing group
/// recalls nothing and fails.
fn recall(ctx: &MatchContext, group: usize, at: usize) -> Option<usize> {
    let captured = ctx.group(group)?.range()?;
    let end = at.checked_add(captured.len())?;
    let copy = ctx.haystack.get(at..end)?;
    if ctx.haystack[captured] == *copy {
        Some(end)
    } else {
        None
    }
}
