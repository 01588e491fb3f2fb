use crate::cursor::Cursor;
use crate::error::{CompileResult, ErrorKind};
use crate::graph::{CharClass, ClassRange, Graph, NodeId, NodeKind, Repetition};

/// Limits enforced while compiling.
#[derive(Clone, Debug)]
pub struct Config {
    nest_limit: u32,
    size_limit: usize,
}

impl Config {
    pub fn new() -> Config {
        Config { nest_limit: 250, size_limit: 1 << 20 }
    }

    /// The deepest permitted nesting of parenthesized groups.
    pub fn nest_limit(mut self, limit: u32) -> Config {
        self.nest_limit = limit;
        self
    }

    /// The largest permitted number of nodes in a compiled graph.
    pub fn size_limit(mut self, limit: usize) -> Config {
        self.size_limit = limit;
        self
    }

    pub fn get_nest_limit(&self) -> u32 {
        self.nest_limit
    }

    pub fn get_size_limit(&self) -> usize {
        self.size_limit
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

/// Compiles a pattern string into a node [`Graph`] in a single left to
/// right scan.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: Config,
}

impl Compiler {
    /// Create a new compiler with the default configuration.
    pub fn new() -> Self {
        Self { config: Config::new() }
    }

    pub fn configure(&mut self, config: Config) -> &mut Compiler {
        self.config = config;
        self
    }

    /// Compile `pattern`, or report the first syntax error in it.
    pub fn compile(&self, pattern: &str) -> CompileResult<Graph> {
        Translation::new(&self.config, pattern).run()
    }
}

/// An alternation scope: the whole pattern (group 0) or one parenthesized
/// group.
#[derive(Clone, Copy, Debug)]
struct Scope {
    /// Every branch of the scope starts here.
    open: NodeId,
    /// Every branch of the scope ends here.
    close: NodeId,
    /// The node the group hangs off, which a quantifier's skip edge leaves
    /// from.
    before: NodeId,
    /// Where the `(` is, for reporting unclosed groups.
    offset: usize,
}

/// A just completed construct that a quantifier may apply to.
#[derive(Clone, Copy, Debug)]
struct Atom {
    before: NodeId,
    start: NodeId,
    end: NodeId,
}

#[derive(Clone, Copy, Debug)]
enum Last {
    /// Start of a term: pattern start, `(`, `|` or an anchor.
    Nothing,
    Atom(Atom),
    Quantified,
}

/// The state of one compilation.
struct Translation<'c, 'p> {
    config: &'c Config,
    cursor: Cursor<'p>,
    graph: Graph,
    root: Scope,
    scopes: Vec<Scope>,
    /// The node the next construct attaches to.
    term_begin: NodeId,
    last: Last,
    groups: usize,
}

impl<'c, 'p> Translation<'c, 'p> {
    fn new(config: &'c Config, pattern: &'p str) -> Translation<'c, 'p> {
        let root = Scope { open: 0, close: 0, before: 0, offset: 0 };
        Translation {
            config,
            cursor: Cursor::new(pattern),
            graph: Graph::new(),
            root,
            scopes: Vec::new(),
            term_begin: 0,
            last: Last::Nothing,
            groups: 0,
        }
    }

    fn run(mut self) -> CompileResult<Graph> {
        let open = self.push(NodeKind::GroupOpen(0))?;
        let terminal = self.push(NodeKind::Terminal)?;
        self.graph.set_entry(open, terminal);
        self.root = Scope { open, close: terminal, before: open, offset: 0 };
        self.term_begin = open;

        while !self.cursor.is_done() {
            let offset = self.cursor.pos();
            match self.cursor.next()? {
                '(' => self.open_group(offset)?,
                ')' => self.close_group(offset)?,
                '|' => self.alternate(),
                ch @ ('?' | '*' | '+' | '{') => self.quantify(offset, ch)?,
                '^' => self.anchor(NodeKind::AnchorStart)?,
                '$' => self.anchor(NodeKind::AnchorEnd)?,
                '.' => self.atom(NodeKind::Wildcard)?,
                '[' => {
                    let class = self.class(offset)?;
                    self.atom(NodeKind::Class(class))?
                }
                '\\' => self.escape(offset)?,
                ch => self.atom(NodeKind::Literal(ch))?,
            }
        }

        if let Some(scope) = self.scopes.last() {
            return Err(self.cursor.error_at(ErrorKind::UnclosedGroup, scope.offset));
        }
        self.graph.connect(self.term_begin, terminal);
        self.graph.set_group_count(self.groups);
        debug!(
            "compiled pattern into {} nodes with {} groups",
            self.graph.len(),
            self.groups
        );
        Ok(self.graph)
    }

    fn current(&self) -> Scope {
        self.scopes.last().copied().unwrap_or(self.root)
    }

    fn push(&mut self, kind: NodeKind) -> CompileResult<NodeId> {
        let limit = self.config.get_size_limit();
        if self.graph.len() >= limit {
            return Err(self.cursor.error(ErrorKind::SizeLimitExceeded(limit)));
        }
        Ok(self.graph.add(kind))
    }

    /// Attach a quantifiable single node construct.
    fn atom(&mut self, kind: NodeKind) -> CompileResult<()> {
        let node = self.push(kind)?;
        self.graph.connect(self.term_begin, node);
        self.last = Last::Atom(Atom { before: self.term_begin, start: node, end: node });
        self.term_begin = node;
        Ok(())
    }

    fn anchor(&mut self, kind: NodeKind) -> CompileResult<()> {
        let node = self.push(kind)?;
        self.graph.connect(self.term_begin, node);
        self.last = Last::Nothing;
        self.term_begin = node;
        Ok(())
    }

    fn open_group(&mut self, offset: usize) -> CompileResult<()> {
        let limit = self.config.get_nest_limit();
        if self.scopes.len() >= limit as usize {
            return Err(self.cursor.error_at(ErrorKind::NestLimitExceeded(limit), offset));
        }
        self.groups += 1;
        let open = self.push(NodeKind::GroupOpen(self.groups))?;
        let close = self.push(NodeKind::GroupClose(self.groups))?;
        self.graph.connect(self.term_begin, open);
        self.scopes.push(Scope { open, close, before: self.term_begin, offset });
        self.term_begin = open;
        self.last = Last::Nothing;
        Ok(())
    }

    fn close_group(&mut self, offset: usize) -> CompileResult<()> {
        let scope = match self.scopes.pop() {
            Some(scope) => scope,
            None => return Err(self.cursor.error_at(ErrorKind::UnopenedGroup, offset)),
        };
        self.graph.connect(self.term_begin, scope.close);
        self.term_begin = scope.close;
        self.last = Last::Atom(Atom {
            before: scope.before,
            start: scope.open,
            end: scope.close,
        });
        Ok(())
    }

    /// End the current branch at the scope's close and start the next one
    /// from the scope's open.
    fn alternate(&mut self) {
        let scope = self.current();
        self.graph.connect(self.term_begin, scope.close);
        self.term_begin = scope.open;
        self.last = Last::Nothing;
    }

    /// Apply the quantifier `op` to the construct just completed.
    fn quantify(&mut self, offset: usize, op: char) -> CompileResult<()> {
        let atom = match self.last {
            Last::Atom(atom) => atom,
            Last::Quantified => {
                return Err(self.cursor.error_at(ErrorKind::StackedQuantifier, offset))
            }
            Last::Nothing => {
                return Err(self.cursor.error_at(ErrorKind::MissingOperand, offset))
            }
        };
        let counted = match op {
            '{' => Some(self.counted(offset)?),
            _ => None,
        };
        let exit = self.push(NodeKind::Empty)?;
        match (op, counted) {
            ('?', _) => {
                self.graph.connect(atom.end, exit);
                self.graph.connect(atom.before, exit);
            }
            ('*', _) => {
                self.graph.connect(atom.end, atom.start);
                self.graph.connect(atom.end, exit);
                self.graph.connect(atom.before, exit);
            }
            ('+', _) => {
                self.graph.connect(atom.end, atom.start);
                self.graph.connect(atom.end, exit);
            }
            (_, Some((min, max))) => {
                let rep = Repetition { min, max, exit };
                let repeat = self.push(NodeKind::Repeat(rep))?;
                self.graph.connect(atom.end, repeat);
                self.graph.connect(repeat, atom.start);
                if min == 0 {
                    self.graph.connect(atom.before, exit);
                }
            }
            _ => unreachable!("not a quantifier: {:?}", op),
        }
        self.term_begin = exit;
        self.last = Last::Quantified;
        Ok(())
    }

    /// Parse the rest of `{m}`, `{m,}` or `{m,n}` after the `{`.
    fn counted(&mut self, offset: usize) -> CompileResult<(u32, Option<u32>)> {
        let min = self.cursor.number()?;
        let max = if self.cursor.eat(',') {
            if self.cursor.peek() == Some('}') {
                None
            } else {
                Some(self.cursor.number()?)
            }
        } else {
            Some(min)
        };
        if !self.cursor.eat('}') {
            let kind = if self.cursor.is_done() {
                ErrorKind::UnexpectedEof
            } else {
                ErrorKind::UnclosedRepetition
            };
            return Err(self.cursor.error(kind));
        }
        if let Some(max) = max {
            if min > max {
                let kind = ErrorKind::RepetitionRangeInverted { min, max };
                return Err(self.cursor.error_at(kind, offset));
            }
        }
        Ok((min, max))
    }

    fn escape(&mut self, offset: usize) -> CompileResult<()> {
        if self.cursor.expect_peek()?.is_ascii_digit() {
            let id = self.cursor.number()?;
            if id as usize > self.groups {
                let kind = ErrorKind::RecallBeforeDefinition(id);
                return Err(self.cursor.error_at(kind, offset));
            }
            return self.atom(NodeKind::Backreference(id as usize));
        }
        let kind = match self.cursor.next()? {
            'd' => NodeKind::Class(CharClass::digit(false)),
            'D' => NodeKind::Class(CharClass::digit(true)),
            's' => NodeKind::Class(CharClass::space(false)),
            'S' => NodeKind::Class(CharClass::space(true)),
            ch => NodeKind::Literal(ch),
        };
        self.atom(kind)
    }

    /// Parse the rest of a bracketed class after the `[`.
    ///
    /// `]` right after the opening (or after `^`) is literal. A `-` is
    /// literal when it comes first or right before the closing `]`, and is
    /// a range operator right after a range start; anywhere else it is an
    /// error. Escapes inside a class are always literal.
    fn class(&mut self, open: usize) -> CompileResult<CharClass> {
        let negated = self.cursor.eat('^');
        let mut ranges = Vec::new();
        let mut first = true;
        loop {
            let at = self.cursor.pos();
            let start = match self.class_char(open)? {
                (']', false) if !first => break,
                ('-', false) if !first && self.cursor.peek() != Some(']') => {
                    return Err(self.cursor.error_at(ErrorKind::MisplacedHyphen, at));
                }
                (ch, _) => ch,
            };
            first = false;

            if !self.cursor.eat('-') {
                ranges.push(ClassRange::single(start));
                continue;
            }
            if self.cursor.peek() == Some(']') {
                ranges.push(ClassRange::single(start));
                ranges.push(ClassRange::single('-'));
                continue;
            }
            let (end, _) = self.class_char(open)?;
            if start > end {
                let kind = ErrorKind::ClassRangeInverted { start, end };
                return Err(self.cursor.error_at(kind, at));
            }
            ranges.push(ClassRange::new(start, end));
        }
        Ok(CharClass::new(negated, ranges))
    }

    /// Read one class character, resolving a `\` escape. The flag tells
    /// whether the character was escaped.
    fn class_char(&mut self, open: usize) -> CompileResult<(char, bool)> {
        let unclosed = |c: &Cursor<'_>| c.error_at(ErrorKind::UnclosedClass, open);
        match self.cursor.next() {
            Ok('\\') => match self.cursor.next() {
                Ok(ch) => Ok((ch, true)),
                Err(_) => Err(unclosed(&self.cursor)),
            },
            Ok(ch) => Ok((ch, false)),
            Err(_) => Err(unclosed(&self.cursor)),
        }
    }
}
