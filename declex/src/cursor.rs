//! Source positions, spans and the cursor that maps byte offsets to them.
//!
//! The lexer works in byte offsets (that is what the scanning engine hands
//! back), while diagnostics are reported as 1-based line/column pairs. The
//! [`SourceCursor`] bridges the two: it walks the source forward once, in
//! lock-step with the lexer, so converting every token boundary costs
//! amortized O(1).
//!
//! # Examples
//!
//! ```rust
//! # use declex::{Position, Span, span};
//! let a = Span::new(Position::new(1, 3), Position::new(1, 7));
//! let b = span!(2, 1, 2, 4).unwrap();
//! assert_eq!(a.merge(&b), Span::new(Position::new(1, 3), Position::new(2, 4)));
//! ```

/// A 1-based line/column position in source text.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source range: `[start, end)`.
///
/// It is conventional for `start <= end` in lexicographic `(line, column)`
/// ordering; this is not enforced.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Starting position (inclusive).
    pub start: Position,
    /// Ending position (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Forward-only walker translating byte offsets into [`Position`]s.
///
/// Offsets passed to [`SourceCursor::advance_to`] must be non-decreasing and
/// must fall on `char` boundaries of the source.
#[derive(Debug, Clone)]
pub struct SourceCursor<'src> {
    source: &'src str,
    offset: usize,
    position: Position,
}

impl<'src> SourceCursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            position: Position::default(),
        }
    }

    /// Moves the cursor forward to `offset` and returns the position there.
    ///
    /// Offsets behind the cursor leave it where it is.
    pub fn advance_to(&mut self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        if offset > self.offset {
            for ch in self.source[self.offset..offset].chars() {
                if ch == '\n' {
                    self.position.line += 1;
                    self.position.column = 1;
                } else {
                    self.position.column += 1;
                }
            }
            self.offset = offset;
        }
        self.position
    }

    /// Converts a byte range into a [`Span`], advancing the cursor to its end.
    pub fn span(&mut self, range: std::ops::Range<usize>) -> Span {
        let start = self.advance_to(range.start);
        let end = self.advance_to(range.end);
        Span::new(start, end)
    }
}

/// Build an `Option<Span>` inline from 1-based line/column coordinates.
///
/// # Examples
///
/// ```rust
/// # use declex::span;
/// let s = span!(1, 1, 2, 4);
/// assert_eq!(s.unwrap().end.column, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        Some($crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        })
    };
}
