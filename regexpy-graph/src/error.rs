use std::fmt;

/// The result of compiling a pattern into a node graph.
pub type CompileResult<T> = Result<T, Error>;

/// An error that occurred while compiling a pattern.
///
/// Every error carries the original pattern and the character offset at
/// which the compiler gave up, so callers can point at the offending spot.
/// Matching never produces an error: a subject string either matches or it
/// doesn't.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    pattern: String,
    offset: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, pattern: &str, offset: usize) -> Error {
        Error { kind, pattern: pattern.to_string(), offset }
    }

    /// Return the type of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The pattern that failed to compile.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The character offset into the pattern where the error was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// A human readable description of what went wrong.
    pub fn description(&self) -> String {
        self.kind.to_string()
    }
}

/// The type of a compile error.
///
/// New variants may be added without it being considered a breaking change.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The pattern ended in the middle of a construct, e.g. `a\`.
    UnexpectedEof,
    /// A decimal number was expected, e.g. the bounds in `a{x}`.
    ExpectedNumber,
    /// A `)` without a matching `(`.
    UnopenedGroup,
    /// A `(` that is never closed.
    UnclosedGroup,
    /// A `[` whose class is never terminated by `]`.
    UnclosedClass,
    /// A quantifier with nothing to repeat, e.g. `*a` or `(|+)`.
    MissingOperand,
    /// A quantifier applied directly to another quantifier, e.g. `a*+`.
    StackedQuantifier,
    /// A counted repetition missing its closing `}`, e.g. `a{3x`.
    UnclosedRepetition,
    /// A counted repetition whose minimum exceeds its maximum, e.g. `a{3,2}`.
    RepetitionRangeInverted { min: u32, max: u32 },
    /// A class range whose start exceeds its end, e.g. `[b-a]`.
    ClassRangeInverted { start: char, end: char },
    /// A `-` inside a class that is neither a literal hyphen nor a range
    /// operator, e.g. `[a-b-c]`.
    MisplacedHyphen,
    /// A backreference to a group that hasn't been opened yet.
    RecallBeforeDefinition(u32),
    /// Groups are nested deeper than the configured limit.
    NestLimitExceeded(u32),
    /// The graph would have more nodes than the configured limit.
    SizeLimitExceeded(usize),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedEof => write!(f, "unexpected end of pattern"),
            ErrorKind::ExpectedNumber => {
                write!(f, "unexpected input where number expected")
            }
            ErrorKind::UnopenedGroup => write!(f, "unopened group"),
            ErrorKind::UnclosedGroup => write!(f, "unclosed group"),
            ErrorKind::UnclosedClass => write!(f, "unclosed character class"),
            ErrorKind::MissingOperand => {
                write!(f, "quantifier without operand")
            }
            ErrorKind::StackedQuantifier => {
                write!(f, "quantifier applied to a quantifier")
            }
            ErrorKind::UnclosedRepetition => {
                write!(f, "unclosed counted repetition")
            }
            ErrorKind::RepetitionRangeInverted { min, max } => write!(
                f,
                "invalid repetition range {{{},{}}}: minimum exceeds maximum",
                min, max
            ),
            ErrorKind::ClassRangeInverted { start, end } => write!(
                f,
                "invalid class range {}-{}: start exceeds end",
                start, end
            ),
            ErrorKind::MisplacedHyphen => {
                write!(f, "hyphen in class must be a range or a literal")
            }
            ErrorKind::RecallBeforeDefinition(id) => {
                write!(f, "recall before definition of group {}", id)
            }
            ErrorKind::NestLimitExceeded(limit) => {
                write!(f, "groups nested deeper than the limit of {}", limit)
            }
            ErrorKind::SizeLimitExceeded(limit) => {
                write!(f, "compiled graph exceeds the limit of {} nodes", limit)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "regex syntax error at offset {} in {:?}: {}",
            self.offset, self.pattern, self.kind
        )
    }
}

impl std::error::Error for Error {}
