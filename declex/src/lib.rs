//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # declex
//!
//! A small front-end for a C-like toy language restricted to arithmetic
//! expressions and type-declaration keywords.
//!
//! Three stages share one token model and never call each other:
//!
//! - [`lexer`]: [`scan`] turns source text into [`Token`]s (longest match
//!   per category) or fails with a [`LexicalError`],
//! - [`parser`]: [`parse`] builds a binary expression tree ([`Node`]) by
//!   recursive descent, honoring `+ -` / `* /` precedence, left
//!   associativity and parentheses, or fails with a [`SyntaxError`],
//! - [`symtab`]: [`build`] derives a [`SymbolTable`] mapping each
//!   identifier to the nearest preceding type keyword and a first-seen
//!   ordinal.
//!
//! Every operation is a pure function of its input: accumulating tokens
//! across several fragments is up to the caller.
//!
//! ## Example
//!
//! ```rust
//! use declex::{build, parse, scan};
//!
//! let tokens = scan("int a = 5 ; float b = 2 ;").unwrap();
//! let table = build(&tokens);
//! assert_eq!(table.get("a").unwrap().ordinal, 1);
//! assert_eq!(table.get("b").unwrap().inferred_type.as_str(), "float");
//!
//! let tree = parse(&scan("(a + b) * c").unwrap()).unwrap();
//! assert_eq!(tree.to_string(), "(* (+ a b) c)");
//! ```
//!
//! ## Logging
//!
//! Stages emit `log` records at `trace` (individual matches, productions,
//! declarations) and `debug` (per-call summaries and failures) level.
pub mod ast;
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symtab;
pub mod token;

pub use ast::Node;
pub use cursor::{Position, SourceCursor, Span};
pub use error::{FrontError, LexicalError, SyntaxError};
pub use lexer::{KeywordTextPolicy, Lexer, LexerOptions, RawToken, scan, scan_with};
pub use parser::{MAX_NESTING, Parser, parse};
pub use symtab::{SymbolEntry, SymbolTable, UNKNOWN_TYPE, build};
pub use token::{KEYWORDS, TYPE_KEYWORDS, Token, TokenKind, is_keyword, is_type_keyword};

/// Scans and parses `source` in one step.
///
/// # Example
/// ```rust
/// # use declex::{parse_source, FrontError, LexerOptions};
/// let tree = parse_source("x / 2 - y", LexerOptions::default()).unwrap();
/// assert_eq!(tree.to_string(), "(- (/ x 2) y)");
///
/// let err = parse_source("x ? y", LexerOptions::default()).unwrap_err();
/// assert!(matches!(err, FrontError::Lexical(_)));
/// ```
pub fn parse_source(source: &str, options: LexerOptions) -> Result<Node, FrontError> {
    let tokens = scan_with(source, options)?;
    Ok(parse(&tokens)?)
}
