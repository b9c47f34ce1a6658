//! Recursive-descent expression parser.
//!
//! The grammar, loosest binding first:
//!
//! ```text
//! expression → term   (('+' | '-') term)*
//! term       → factor (('*' | '/') factor)*
//! factor     → Literal | Identifier | '(' expression ')'
//! ```
//!
//! Each rule is one method on [`Parser`]. Repetitions fold to the left, so
//! `a - b - c` builds `(a - b) - c`. The whole token slice must be consumed;
//! the first violation aborts the parse with a [`SyntaxError`].
//!
//! Every parenthesis level costs one round of recursion, so nesting is
//! capped at [`MAX_NESTING`] levels. Operator chains are folded in loops and
//! have no such limit.
//!
//! Each node's [`span`](Node::span) covers its whole subexpression,
//! including enclosing parentheses.
use crate::{Node, Span, SyntaxError, Token, TokenKind};

/// Deepest parenthesis nesting [`parse`] accepts.
pub const MAX_NESTING: usize = 128;

const EXPECTED_OPERAND: &str = "literal, identifier or `(`";
const EXPECTED_CLOSE: &str = "`)`";

/// Parser state over a borrowed token slice.
///
/// A single trailing [`TokenKind::EndOfInput`] marker is accepted and
/// ignored; anywhere else it is an unexpected token.
#[derive(Debug, Clone)]
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    /// Creates a parser positioned at the first token.
    pub fn new(tokens: &'t [Token]) -> Self {
        let tokens = match tokens.split_last() {
            Some((last, rest)) if last.kind == TokenKind::EndOfInput => rest,
            _ => tokens,
        };
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses one complete expression.
    pub fn parse(mut self) -> Result<Node, SyntaxError> {
        let root = self.expression()?;
        if let Some(tok) = self.peek() {
            log::debug!("trailing token {tok} at index {}", self.pos);
            return Err(SyntaxError::TrailingTokens {
                found: tok.clone(),
                span: tok.span,
            });
        }
        log::trace!("accepted {root}");
        Ok(root)
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }

    /// Consumes the next token if it is one of `ops`, returning its text.
    fn eat_operator(&mut self, ops: &[&str]) -> Option<&'t str> {
        let tok = self.peek()?;
        if ops.iter().any(|op| tok.is_operator(op)) {
            self.pos += 1;
            Some(tok.text.as_str())
        } else {
            None
        }
    }

    fn expression(&mut self) -> Result<Node, SyntaxError> {
        log::trace!("expression at {}", self.pos);
        let mut lhs = self.term()?;
        while let Some(op) = self.eat_operator(&["+", "-"]) {
            let rhs = self.term()?;
            lhs = Node::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Node, SyntaxError> {
        log::trace!("term at {}", self.pos);
        let mut lhs = self.factor()?;
        while let Some(op) = self.eat_operator(&["*", "/"]) {
            let rhs = self.factor()?;
            lhs = Node::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Node, SyntaxError> {
        log::trace!("factor at {}", self.pos);
        let Some(tok) = self.bump() else {
            return Err(SyntaxError::UnexpectedEnd {
                expected: EXPECTED_OPERAND,
            });
        };
        match tok.kind {
            TokenKind::Literal | TokenKind::Identifier => {
                Ok(Node::leaf(&tok.text).with_span(tok.span))
            }
            TokenKind::Delimiter if tok.text.as_str() == "(" => {
                if self.depth >= MAX_NESTING {
                    log::debug!("nesting limit reached at index {}", self.pos - 1);
                    return Err(SyntaxError::NestingTooDeep {
                        limit: MAX_NESTING,
                        span: tok.span,
                    });
                }
                self.depth += 1;
                let mut inner = self.expression()?;
                let close = self.close_paren(tok.span)?;
                self.depth -= 1;
                inner.extend_span(tok.span);
                inner.extend_span(close.span);
                Ok(inner)
            }
            _ => Err(SyntaxError::UnexpectedToken {
                found: tok.clone(),
                expected: EXPECTED_OPERAND,
                span: tok.span,
            }),
        }
    }

    fn close_paren(&mut self, open: Option<Span>) -> Result<&'t Token, SyntaxError> {
        match self.bump() {
            Some(tok) if tok.is_delimiter(")") => Ok(tok),
            Some(tok) => Err(SyntaxError::UnexpectedToken {
                found: tok.clone(),
                expected: EXPECTED_CLOSE,
                span: tok.span,
            }),
            None => Err(SyntaxError::UnclosedParen { open }),
        }
    }
}

/// Parses a token sequence into an expression tree.
///
/// # Example
/// ```rust
/// # use declex::{parse, scan};
/// let tree = parse(&scan("a + b * c").unwrap()).unwrap();
/// assert_eq!(tree.to_string(), "(+ a (* b c))");
/// ```
pub fn parse(tokens: &[Token]) -> Result<Node, SyntaxError> {
    Parser::new(tokens).parse()
}
