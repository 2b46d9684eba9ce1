//! Position and range tracking for source text
//!
//! Every token, error and parsed node carries a [`Range`], so that tooling consuming the
//! tree (an editor highlighting errors, a viewer mapping nodes back to text) never has to
//! re-lex the source.
//!
//! ## Key Design
//!
//! - **Codepoint offsets**: `index` and `col` count Unicode scalar values, not bytes, so
//!   `λ` advances both by one.
//! - **Half-open ranges**: `end` is exclusive. Zero-width ranges are valid and mark nodes
//!   the parser synthesized for missing syntax.
//! - **No null locations**: the default position is `(0, 0, 0)`, the start of input.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in source text.
///
/// Field order matters: the derived ordering compares `index` first, which is the only
/// coordinate guaranteed to be monotonic across a lex pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The start of input.
    pub const ZERO: Position = Position {
        index: 0,
        row: 0,
        col: 0,
    };

    pub fn new(index: usize, row: usize, col: usize) -> Self {
        Self { index, row, col }
    }

    /// Advance past `text`, counting newlines.
    ///
    /// The row grows by the number of newlines in `text`; the column becomes the length
    /// of the text after the last newline, or grows by the length of `text` if it has none.
    pub fn advance(self, text: &str) -> Self {
        let mut next = self;
        for ch in text.chars() {
            next.index += 1;
            if ch == '\n' {
                next.row += 1;
                next.col = 0;
            } else {
                next.col += 1;
            }
        }
        next
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A half-open span of source text, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-width range at `at`.
    pub fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start.index == self.end.index
    }

    /// Number of codepoints covered.
    pub fn len(&self) -> usize {
        self.end.index.saturating_sub(self.start.index)
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &Range) -> Range {
        Range {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Check if a position falls within this range (the exclusive end included, so a
    /// cursor sitting right after a token still hits it)
    pub fn contains(&self, pos: Position) -> bool {
        self.start.index <= pos.index && pos.index <= self.end.index
    }

    /// Build a bounding box that contains all provided ranges.
    pub fn bounding_box<'a, I>(mut ranges: I) -> Option<Range>
    where
        I: Iterator<Item = &'a Range>,
    {
        let first = *ranges.next()?;
        Some(ranges.fold(first, |acc, range| acc.union(range)))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_position_is_default() {
        assert_eq!(Position::default(), Position::ZERO);
        assert_eq!(Range::default(), Range::empty(Position::ZERO));
    }

    #[test]
    fn test_advance_single_line() {
        let pos = Position::ZERO.advance("abc");
        assert_eq!(pos, Position::new(3, 0, 3));
    }

    #[test]
    fn test_advance_counts_codepoints() {
        let pos = Position::ZERO.advance("λx");
        assert_eq!(pos, Position::new(2, 0, 2));
    }

    #[test]
    fn test_advance_multiline() {
        let pos = Position::new(4, 0, 4).advance(" \n\n  ");
        assert_eq!(pos, Position::new(9, 2, 2));
    }

    #[test]
    fn test_position_ordering_follows_index() {
        assert!(Position::new(1, 0, 1) < Position::new(2, 0, 2));
        assert!(Position::new(5, 0, 5) < Position::new(6, 1, 0));
    }

    #[test]
    fn test_union() {
        let a = Range::new(Position::new(2, 0, 2), Position::new(3, 0, 3));
        let b = Range::new(Position::new(0, 0, 0), Position::new(1, 0, 1));
        let joined = a.union(&b);
        assert_eq!(joined.start, Position::new(0, 0, 0));
        assert_eq!(joined.end, Position::new(3, 0, 3));
    }

    #[test]
    fn test_empty_range() {
        let range = Range::empty(Position::new(7, 1, 2));
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
    }

    #[test]
    fn test_contains() {
        let range = Range::new(Position::new(2, 0, 2), Position::new(5, 0, 5));
        assert!(range.contains(Position::new(2, 0, 2)));
        assert!(range.contains(Position::new(5, 0, 5)));
        assert!(!range.contains(Position::new(6, 0, 6)));
        assert!(!range.contains(Position::new(1, 0, 1)));
    }

    #[test]
    fn test_bounding_box() {
        let ranges = [
            Range::new(Position::new(4, 0, 4), Position::new(5, 0, 5)),
            Range::new(Position::new(1, 0, 1), Position::new(2, 0, 2)),
            Range::new(Position::new(8, 1, 0), Position::new(9, 1, 1)),
        ];
        let bbox = Range::bounding_box(ranges.iter()).unwrap();
        assert_eq!(bbox.start, Position::new(1, 0, 1));
        assert_eq!(bbox.end, Position::new(9, 1, 1));
    }

    #[test]
    fn test_bounding_box_empty_iter() {
        assert!(Range::bounding_box(std::iter::empty::<&Range>()).is_none());
    }

    #[test]
    fn test_display() {
        let range = Range::new(Position::new(0, 0, 0), Position::new(8, 1, 2));
        assert_eq!(format!("{}", range), "0:0..1:2");
    }
}
