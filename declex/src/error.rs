//! # Front-end Error Types
//!
//! Two error kinds exist, one per fallible stage:
//!
//! - [`LexicalError`]: an unrecognized character, fatal to one
//!   [`scan`](crate::scan) call,
//! - [`SyntaxError`]: a grammar violation, fatal to one
//!   [`parse`](crate::parse) call.
//!
//! [`FrontError`] aggregates both for callers that run the stages back to
//! back (see [`parse_source`](crate::parse_source)); conversions are derived
//! with `#[from]` so `?` works across stages.
use crate::{Position, Span, Token};
use thiserror::Error;

/// A character the lexer does not recognize.
///
/// # Example
/// ```rust
/// # use declex::{scan, LexicalError};
/// let err = scan("a $ b").unwrap_err();
/// assert_eq!(err.ch, '$');
/// assert_eq!(err.offset, 2);
/// assert_eq!(err.to_string(), "unrecognized character '$' at 1:3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized character {ch:?} at {position}")]
pub struct LexicalError {
    /// The offending character.
    pub ch: char,
    /// Byte offset of `ch` in the source.
    pub offset: usize,
    /// 1-based line/column of `ch`.
    pub position: Position,
}

/// A violation of the expression grammar.
///
/// The parser stops at the first one; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Input ran out where `expected` was required.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for.
        expected: &'static str,
    },

    /// A token that cannot start or continue the current production.
    #[error("unexpected {found}, expected {expected}{}", at(.span))]
    UnexpectedToken {
        found: Token,
        expected: &'static str,
        span: Option<Span>,
    },

    /// A `(` whose matching `)` never arrived.
    #[error("missing closing parenthesis for `(`{}", at(.open))]
    UnclosedParen {
        /// Location of the unmatched `(`.
        open: Option<Span>,
    },

    /// Parentheses nested deeper than the parser allows.
    #[error("parentheses nested deeper than {limit} levels{}", at(.span))]
    NestingTooDeep {
        limit: usize,
        /// Location of the first `(` past the limit.
        span: Option<Span>,
    },

    /// A complete expression followed by more tokens.
    #[error("trailing {found} after complete expression{}", at(.span))]
    TrailingTokens { found: Token, span: Option<Span> },
}

fn at(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at {}", span.start),
        None => String::new(),
    }
}

/// Any failure of the scan-then-parse pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontError {
    /// Scanning failed.
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),

    /// Parsing failed.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}
