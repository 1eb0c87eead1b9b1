//! Source location spans.
//!
//! Spans record the start and end line of a node as reported by the external
//! parser. The repair core never re-reads source text, so line granularity is
//! all it needs to relate nodes to suspicious-statement reports.

use std::fmt;

/// Source location span in lines.
///
/// Layout: 8 bytes total
/// - start: u32 - first line of the node (1-based, inclusive)
/// - end: u32 - last line of the node (inclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Span covering a single line.
    #[inline]
    pub const fn line(line: u32) -> Self {
        Span {
            start: line,
            end: line,
        }
    }

    /// Number of lines covered.
    #[inline]
    pub const fn lines(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    /// Check if a line falls within this span.
    #[inline]
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }

    /// Check if another span is fully contained within this span.
    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        let span = Span::new(10, 20);
        assert_eq!(span.lines(), 11);
        assert!(span.contains_line(10));
        assert!(span.contains_line(20));
        assert!(!span.contains_line(21));
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(10, 20);
        let b = Span::new(15, 30);
        let merged = a.merge(b);
        assert_eq!(merged.start, 10);
        assert_eq!(merged.end, 30);
    }

    #[test]
    fn test_span_contains_span() {
        let outer = Span::new(5, 40);
        assert!(outer.contains_span(Span::new(10, 20)));
        assert!(outer.contains_span(outer));
        assert!(!outer.contains_span(Span::new(4, 10)));
        assert!(!outer.contains_span(Span::new(10, 41)));
    }

    #[test]
    fn test_span_single_line() {
        let span = Span::line(7);
        assert_eq!(span.lines(), 1);
        assert!(span.contains_line(7));
        assert!(!span.contains_line(8));
    }

    #[test]
    fn test_span_debug_display() {
        let span = Span::new(100, 200);
        assert_eq!(format!("{span:?}"), "100..200");
        assert_eq!(format!("{span}"), "100..200");
    }
}
