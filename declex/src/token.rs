//! # Tokens
//!
//! This module defines the token model shared by every stage of the
//! front-end:
//!
//! - [`TokenKind`]: the lexical category of a token,
//! - [`Token`]: a kind, the matched lexeme and (when produced by the lexer)
//!   its source [`Span`],
//! - the reserved-word tables [`KEYWORDS`] and [`TYPE_KEYWORDS`].
//!
//! Tokens are produced by the [`lexer`](crate::lexer) and consumed,
//! independently, by the [`parser`](crate::parser) and the
//! [`symtab`](crate::symtab) builder.
use crate::Span;
use smartstring::alias::String;
use std::fmt;

/// Reserved words of the language, in lowercase.
pub const KEYWORDS: &[&str] = &[
    "if", "else", "while", "for", "return", "int", "float", "double", "char",
];

/// The subset of [`KEYWORDS`] that tags subsequently declared identifiers.
pub const TYPE_KEYWORDS: &[&str] = &["int", "float", "double", "char"];

/// Returns `true` if `word` is a reserved word, ignoring ASCII case.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// Returns `true` if `word` is a type keyword, ignoring ASCII case.
pub fn is_type_keyword(word: &str) -> bool {
    TYPE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
}

/// The lexical category of a [`Token`].
///
/// There is no "invalid" category: input the lexer cannot
/// classify is reported as a [`LexicalError`](crate::LexicalError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// One of [`KEYWORDS`].
    Keyword,
    /// A name that is not a keyword.
    Identifier,
    /// A numeric literal (digits and dots).
    Literal,
    /// One of `+ - * /`.
    Operator,
    /// One of `( ) , ; =`.
    Delimiter,
    /// End-of-input marker. Never produced by [`scan`](crate::scan); accepted
    /// as a terminator by the parser when a caller appends one.
    EndOfInput,
}

impl TokenKind {
    /// Human-readable category name.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Literal => "Literal",
            TokenKind::Operator => "Operator",
            TokenKind::Delimiter => "Delimiter",
            TokenKind::EndOfInput => "EndOfInput",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme.
///
/// `text` is the matched lexeme. For keywords its case depends on the
/// lexer's [`KeywordTextPolicy`](crate::KeywordTextPolicy); identifiers and
/// literals always keep the source text verbatim.
///
/// # Example
/// ```rust
/// # use declex::{Token, TokenKind};
/// let tok = Token::new(TokenKind::Identifier, "total");
/// assert_eq!(tok.kind, TokenKind::Identifier);
/// assert_eq!(tok.text.as_str(), "total");
/// assert!(tok.span.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The token's category.
    pub kind: TokenKind,
    /// The matched lexeme.
    pub text: String,
    /// Source location, when the token came from the lexer.
    pub span: Option<Span>,
}

impl Token {
    /// Creates a token without a source location.
    pub fn new(kind: TokenKind, text: impl AsRef<str>) -> Self {
        Self {
            kind,
            text: String::from(text.as_ref()),
            span: None,
        }
    }

    /// The end-of-input marker.
    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "")
    }

    /// Returns `true` for the operator token `op`.
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text.as_str() == op
    }

    /// Returns `true` for the delimiter token `delim`.
    pub fn is_delimiter(&self, delim: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.text.as_str() == delim
    }

    /// Returns `true` for a keyword token naming one of [`TYPE_KEYWORDS`].
    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && is_type_keyword(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::EndOfInput {
            f.write_str("end of input")
        } else {
            write!(f, "{} `{}`", self.kind, self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_ignores_case() {
        assert!(is_keyword("while"));
        assert!(is_keyword("WHILE"));
        assert!(is_keyword("Return"));
        assert!(!is_keyword("whilst"));
        assert!(!is_keyword(""));
    }

    #[test]
    fn type_keywords_are_keywords() {
        for k in TYPE_KEYWORDS {
            assert!(is_keyword(k));
            assert!(is_type_keyword(k));
        }
        assert!(!is_type_keyword("if"));
        assert!(is_type_keyword("Double"));
    }

    #[test]
    fn token_type_keyword_requires_keyword_kind() {
        assert!(Token::new(TokenKind::Keyword, "float").is_type_keyword());
        assert!(Token::new(TokenKind::Keyword, "CHAR").is_type_keyword());
        assert!(!Token::new(TokenKind::Identifier, "float").is_type_keyword());
        assert!(!Token::new(TokenKind::Keyword, "return").is_type_keyword());
    }

    #[test]
    fn operator_and_delimiter_predicates() {
        let plus = Token::new(TokenKind::Operator, "+");
        assert!(plus.is_operator("+"));
        assert!(!plus.is_operator("-"));
        assert!(!plus.is_delimiter("+"));

        let lp = Token::new(TokenKind::Delimiter, "(");
        assert!(lp.is_delimiter("("));
        assert!(!lp.is_operator("("));
    }

    #[test]
    fn display_names_kind_and_text() {
        let t = Token::new(TokenKind::Literal, "3.14");
        assert_eq!(t.to_string(), "Literal `3.14`");
        assert_eq!(Token::end_of_input().to_string(), "end of input");
    }

    #[test]
    fn kind_names_match_listing_labels() {
        assert_eq!(TokenKind::Keyword.to_string(), "Keyword");
        assert_eq!(TokenKind::Delimiter.name(), "Delimiter");
    }

    #[test]
    fn hand_built_tokens_have_no_span() {
        assert_eq!(Token::new(TokenKind::Identifier, "x").span, None);
        assert_eq!(Token::end_of_input().span, None);
    }
}
