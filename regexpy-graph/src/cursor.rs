use crate::error::{CompileResult, Error, ErrorKind};

/// A sequential reader over the characters of a pattern.
///
/// Running out of input where more is required is reported as a syntax
/// error positioned at the end of the pattern.
#[derive(Debug)]
pub(crate) struct Cursor<'p> {
    pattern: &'p str,
    chars: Vec<char>,
    pos: usize,
}

impl<'p> Cursor<'p> {
    pub(crate) fn new(pattern: &'p str) -> Cursor<'p> {
        Cursor { pattern, chars: pattern.chars().collect(), pos: 0 }
    }

    /// The character offset of the next unread character.
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Look at the next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Like `peek`, but running out of input is an error.
    pub(crate) fn expect_peek(&self) -> CompileResult<char> {
        self.peek().ok_or_else(|| self.error(ErrorKind::UnexpectedEof))
    }

    /// Consume and return the next character.
    pub(crate) fn next(&mut self) -> CompileResult<char> {
        let ch = self.expect_peek()?;
        self.pos += 1;
        Ok(ch)
    }

    /// Consume the next character if it is `ch`.
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume a run of ASCII digits and return its decimal value.
    pub(crate) fn number(&mut self) -> CompileResult<u32> {
        let start = self.pos;
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error(ErrorKind::ExpectedNumber));
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        digits.parse().map_err(|_| self.error(ErrorKind::ExpectedNumber))
    }

    /// Build an error positioned at the cursor.
    pub(crate) fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.pattern, self.pos)
    }

    /// Build an error positioned at an earlier offset.
    pub(crate) fn error_at(&self, kind: ErrorKind, offset: usize) -> Error {
        Error::new(kind, self.pattern, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_in_order() {
        let mut c = Cursor::new("ab");
        assert_eq!(c.peek(), Some('a'));
        assert_eq!(c.next().unwrap(), 'a');
        assert_eq!(c.next().unwrap(), 'b');
        assert!(c.is_done());
        assert_eq!(c.next().unwrap_err().kind(), &ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_eat_only_matching() {
        let mut c = Cursor::new("x");
        assert!(!c.eat('y'));
        assert!(c.eat('x'));
        assert!(!c.eat('x'));
    }

    #[test]
    fn test_multi_digit_number() {
        let mut c = Cursor::new("123,4");
        assert_eq!(c.number().unwrap(), 123);
        assert_eq!(c.peek(), Some(','));
    }

    #[test]
    fn test_number_requires_digit() {
        let mut c = Cursor::new("x");
        let err = c.number().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::ExpectedNumber);
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_number_overflow_is_error() {
        let mut c = Cursor::new("99999999999999999999");
        assert_eq!(c.number().unwrap_err().kind(), &ErrorKind::ExpectedNumber);
    }
}
