use std::ops::Range;

/// The half open `[begin, end)` character offsets captured by one instance
/// of a group.
///
/// A group is entered before it is exited, so the two ends are set
/// independently. Offsets count `char`s, not bytes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Span {
    begin: Option<usize>,
    end: Option<usize>,
}

impl Span {
    /// A span whose beginning is known but whose end isn't yet.
    pub fn starting_at(begin: usize) -> Span {
        Span { begin: Some(begin), end: None }
    }

    /// A fully defined span.
    ///
    /// # Panics
    ///
    /// When `begin > end`.
    pub fn new(begin: usize, end: usize) -> Span {
        assert!(begin <= end, "span begin {} exceeds end {}", begin, end);
        Span { begin: Some(begin), end: Some(end) }
    }

    pub fn begin(&self) -> Option<usize> {
        self.begin
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// True when both ends are set.
    pub fn is_defined(&self) -> bool {
        self.begin.is_some() && self.end.is_some()
    }

    /// The number of characters covered, if the span is defined.
    pub fn len(&self) -> Option<usize> {
        self.range().map(|r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn range(&self) -> Option<Range<usize>> {
        match (self.begin, self.end) {
            (Some(begin), Some(end)) => Some(begin..end),
            _ => None,
        }
    }

    /// Set (or clear) the end, returning the previous end so the caller can
    /// put it back when backtracking.
    pub(crate) fn replace_end(&mut self, end: Option<usize>) -> Option<usize> {
        if let (Some(begin), Some(end)) = (self.begin, end) {
            debug_assert!(begin <= end, "span end {} before begin {}", end, begin);
        }
        std::mem::replace(&mut self.end, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_span_is_undefined() {
        let span = Span::starting_at(3);
        assert_eq!(span.begin(), Some(3));
        assert!(!span.is_defined());
        assert_eq!(span.len(), None);
        assert_eq!(Span::default().begin(), None);
    }

    #[test]
    fn test_closing_and_reopening_end() {
        let mut span = Span::starting_at(1);
        assert_eq!(span.replace_end(Some(4)), None);
        assert_eq!(span.len(), Some(3));
        assert_eq!(span.range(), Some(1..4));
        assert_eq!(span.replace_end(None), Some(4));
        assert!(!span.is_defined());
        assert_eq!(span.begin(), Some(1));
    }

    #[test]
    fn test_empty_span() {
        assert!(Span::new(2, 2).is_empty());
        assert!(!Span::new(2, 3).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_reversed_span_panics() {
        Span::new(3, 2);
    }
}
