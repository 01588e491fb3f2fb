use std::fmt;

/// An index of a node in its graph.
pub type NodeId = usize;

/// An inclusive range of characters in a class. Single characters are
/// stored as one element ranges.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClassRange {
    pub start: char,
    pub end: char,
}

impl ClassRange {
    pub fn new(start: char, end: char) -> ClassRange {
        debug_assert!(start <= end);
        ClassRange { start, end }
    }

    pub fn single(ch: char) -> ClassRange {
        ClassRange { start: ch, end: ch }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.start <= ch && ch <= self.end
    }
}

/// A bracketed character class, or one of the `\d \D \s \S` shorthands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharClass {
    pub negated: bool,
    pub ranges: Vec<ClassRange>,
}

impl CharClass {
    pub fn new(negated: bool, ranges: Vec<ClassRange>) -> CharClass {
        CharClass { negated, ranges }
    }

    /// `\d` (or `\D` when negated).
    pub fn digit(negated: bool) -> CharClass {
        CharClass::new(negated, vec![ClassRange::new('0', '9')])
    }

    /// `\s` (or `\S` when negated): `\r \n \t \f` and space.
    pub fn space(negated: bool) -> CharClass {
        let ranges = ['\r', '\n', '\t', '\x0C', ' ']
            .iter()
            .map(|&c| ClassRange::single(c))
            .collect();
        CharClass::new(negated, ranges)
    }

    pub fn matches(&self, ch: char) -> bool {
        self.ranges.iter().any(|r| r.contains(ch)) != self.negated
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        if self.negated {
            write!(f, "^")?;
        }
        for r in &self.ranges {
            if r.start == r.end {
                write!(f, "{}", r.start.escape_debug())?;
            } else {
                write!(f, "{}-{}", r.start.escape_debug(), r.end.escape_debug())?;
            }
        }
        write!(f, "]")
    }
}

/// The bounds of a counted repetition, together with the node the
/// repetition continues to once it stops looping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Repetition {
    pub min: u32,
    /// `None` means unbounded.
    pub max: Option<u32>,
    pub exit: NodeId,
}

impl Repetition {
    /// Whether `count` passes over the body leave room for another.
    pub fn may_loop(&self, count: u32) -> bool {
        self.max.map_or(true, |max| count < max)
    }

    /// Whether `count` passes have gone past the upper bound.
    pub fn exceeded(&self, count: u32) -> bool {
        self.max.map_or(false, |max| count > max)
    }

    /// Whether `count` passes satisfy the lower bound.
    pub fn satisfied(&self, count: u32) -> bool {
        count >= self.min
    }
}

/// What a node does when the matcher reaches it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NodeKind {
    /// Consumes one character equal to the symbol.
    Literal(char),
    /// Consumes any one character.
    Wildcard,
    /// Consumes one character accepted by the class.
    Class(CharClass),
    /// Zero width join point.
    Empty,
    /// Records the start of an instance of the group.
    GroupOpen(usize),
    /// Records the end of the current instance of the group.
    GroupClose(usize),
    /// Closes group 0 and accepts only at the end of the subject.
    Terminal,
    /// Consumes a repeat of the text last captured by the group.
    Backreference(usize),
    /// Counts passes over a repetition body and gates looping and exiting.
    Repeat(Repetition),
    /// Zero width, succeeds only at offset 0.
    AnchorStart,
    /// Zero width, succeeds only at the end of the subject.
    AnchorEnd,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Literal(ch) => write!(f, "'{}'", ch.escape_debug()),
            NodeKind::Wildcard => write!(f, "ANY"),
            NodeKind::Class(class) => write!(f, "CLASS {}", class),
            NodeKind::Empty => write!(f, "EMPTY"),
            NodeKind::GroupOpen(id) => write!(f, "OPEN({})", id),
            NodeKind::GroupClose(id) => write!(f, "CLOSE({})", id),
            NodeKind::Terminal => write!(f, "TERMINAL"),
            NodeKind::Backreference(id) => write!(f, "RECALL({})", id),
            NodeKind::Repeat(rep) => match rep.max {
                Some(max) => {
                    write!(f, "REPEAT{{{},{}}} exit={}", rep.min, max, rep.exit)
                }
                None => write!(f, "REPEAT{{{},}} exit={}", rep.min, rep.exit),
            },
            NodeKind::AnchorStart => write!(f, "^"),
            NodeKind::AnchorEnd => write!(f, "$"),
        }
    }
}

/// A node together with its outgoing edges.
///
/// Edge order is significant: the matcher explores successors in the order
/// they were added, which is what makes quantifiers greedy and alternation
/// left-biased.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    kind: NodeKind,
    next: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The successors of this node, in exploration order.
    pub fn next(&self) -> &[NodeId] {
        &self.next
    }
}

/// A compiled pattern: a directed, possibly cyclic graph of nodes.
///
/// Nodes refer to each other by index into a single arena, so the graph has
/// no ownership cycles and is freely shareable between threads. Nothing in
/// it changes after compilation; all per-match state lives in a
/// matcher's own context.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    start: NodeId,
    terminal: NodeId,
    group_count: usize,
}

impl Graph {
    pub(crate) fn new() -> Graph {
        Graph { nodes: Vec::new(), start: 0, terminal: 0, group_count: 0 }
    }

    /// The node every match attempt starts at (the opening of group 0).
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// The node that accepts at the end of the subject.
    pub fn terminal(&self) -> NodeId {
        self.terminal
    }

    /// The number of parenthesized groups, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    pub(crate) fn add(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { kind, next: Vec::new() });
        id
    }

    /// Append an edge `from -> to`.
    pub(crate) fn connect(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from].next.push(to);
    }

    pub(crate) fn set_entry(&mut self, start: NodeId, terminal: NodeId) {
        self.start = start;
        self.terminal = terminal;
    }

    pub(crate) fn set_group_count(&mut self, count: usize) {
        self.group_count = count;
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}, groups: {}", self.start, self.group_count)?;
        for (id, node) in self.nodes() {
            writeln!(f, "{:>4}: {} -> {:?}", id, node.kind, node.next)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_negation() {
        let class = CharClass::new(false, vec![ClassRange::new('a', 'c')]);
        assert!(class.matches('b'));
        assert!(!class.matches('d'));
        let class = CharClass::new(true, vec![ClassRange::new('a', 'c')]);
        assert!(!class.matches('b'));
        assert!(class.matches('d'));
    }

    #[test]
    fn test_shorthand_classes() {
        assert!(CharClass::digit(false).matches('7'));
        assert!(!CharClass::digit(true).matches('7'));
        for c in ['\r', '\n', '\t', '\x0C', ' '] {
            assert!(CharClass::space(false).matches(c));
            assert!(!CharClass::space(true).matches(c));
        }
        assert!(CharClass::space(true).matches('x'));
        // vertical tab isn't part of \s here
        assert!(!CharClass::space(false).matches('\x0B'));
    }

    #[test]
    fn test_repetition_bounds() {
        let rep = Repetition { min: 2, max: Some(3), exit: 0 };
        assert!(!rep.satisfied(1));
        assert!(rep.satisfied(2));
        assert!(rep.may_loop(2));
        assert!(!rep.may_loop(3));
        assert!(!rep.exceeded(3));
        assert!(rep.exceeded(4));

        let rep = Repetition { min: 0, max: None, exit: 0 };
        assert!(rep.may_loop(u32::MAX - 1));
        assert!(!rep.exceeded(u32::MAX));
    }

    #[test]
    fn test_edges_keep_insertion_order() {
        let mut g = Graph::new();
        let a = g.add(NodeKind::Empty);
        let b = g.add(NodeKind::Literal('b'));
        let c = g.add(NodeKind::Wildcard);
        g.connect(a, c);
        g.connect(a, b);
        g.connect(a, a);
        assert_eq!(g.node(a).next(), &[c, b, a]);
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn test_display_lists_every_node() {
        let mut g = Graph::new();
        let a = g.add(NodeKind::GroupOpen(0));
        let t = g.add(NodeKind::Terminal);
        g.connect(a, t);
        g.set_entry(a, t);
        let out = g.to_string();
        assert!(out.contains("OPEN(0) -> [1]"), "{}", out);
        assert!(out.contains("TERMINAL -> []"), "{}", out);
    }
}
