//! Lexer module.
//!
//! Converts raw source text into an ordered sequence of [`Token`]s. This is
//! the first stage of the front-end; its output is consumed, independently,
//! by the [`parser`](crate::parser) and the [`symtab`](crate::symtab)
//! builder.
//!
//! # Overview
//! Recognition is done by the [`logos`] crate through the [`RawToken`]
//! definition, which implements longest-match scanning per category.
//! [`Lexer`] wraps the generated automaton, classifies words into keywords
//! or identifiers, attaches source spans and turns unmatched input into a
//! [`LexicalError`].
//!
//! # Categories
//! At each position, after skipping whitespace:
//! - a digit starts a **literal**: the longest run of digits and `.`
//!   characters (so `1.2.3` is a single literal),
//! - an ASCII letter starts a **word**: the longest run of ASCII letters,
//!   digits and `_`; it is a keyword when its lowercase form is one of
//!   [`KEYWORDS`](crate::KEYWORDS), an identifier otherwise,
//! - `+ - * /` are single-character **operators**,
//! - `( ) , ; =` are single-character **delimiters**,
//! - anything else is an error.
use crate::{LexicalError, SourceCursor, Token, TokenKind, token};
use logos::Logos;
use smartstring::alias::String;

/// How keyword lexemes are stored in [`Token::text`].
///
/// Keyword recognition itself is always case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeywordTextPolicy {
    /// Keep the lexeme as written (`INT` stays `INT`).
    PreserveOriginal,
    /// Store the lowercase form (`INT` becomes `int`).
    #[default]
    NormalizeLowercase,
}

/// Lexer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerOptions {
    pub keyword_text: KeywordTextPolicy,
}

impl LexerOptions {
    #[must_use]
    pub fn with_keyword_text(mut self, policy: KeywordTextPolicy) -> Self {
        self.keyword_text = policy;
        self
    }
}

/// Raw tokens recognized by the `logos`-based automaton.
///
/// Whitespace is skipped here; the split of [`RawToken::Word`] into keywords
/// and identifiers happens in [`Lexer`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f\x0B]+")]
pub enum RawToken {
    /// A digit followed by any run of digits and dots.
    #[regex(r"[0-9][0-9.]*")]
    Number,

    /// An ASCII letter followed by letters, digits and underscores.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Word,

    /// One of `+ - * /`.
    #[regex(r"[-+*/]")]
    Operator,

    /// One of `( ) , ; =`.
    #[regex(r"[(),;=]")]
    Delimiter,
}

/// Source-level lexer.
///
/// `Lexer` is an [`Iterator`] over `Result<Token, LexicalError>`. After the
/// first error it is exhausted: scanning never resumes past an unrecognized
/// character.
///
/// # Example
/// ```rust
/// # use declex::{Lexer, LexerOptions, TokenKind};
/// let mut lexer = Lexer::new("Int x", LexerOptions::default());
/// let tok = lexer.next().unwrap().unwrap();
/// assert_eq!(tok.kind, TokenKind::Keyword);
/// assert_eq!(tok.text.as_str(), "int");
/// ```
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    cursor: SourceCursor<'src>,
    options: LexerOptions,
    failed: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source`.
    pub fn new(source: &'src str, options: LexerOptions) -> Self {
        Self {
            inner: RawToken::lexer(source),
            cursor: SourceCursor::new(source),
            options,
            failed: false,
        }
    }

    /// Retrieves the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexicalError> {
        if self.failed {
            return Ok(None);
        }
        let Some(raw) = self.inner.next() else {
            return Ok(None);
        };
        let range = self.inner.span();
        let slice = self.inner.slice();
        let raw = match raw {
            Ok(raw) => raw,
            Err(()) => {
                self.failed = true;
                return Err(self.error_at(range.start));
            }
        };

        let (kind, text) = match raw {
            RawToken::Number => (TokenKind::Literal, String::from(slice)),
            RawToken::Word if token::is_keyword(slice) => {
                let text = match self.options.keyword_text {
                    KeywordTextPolicy::PreserveOriginal => String::from(slice),
                    KeywordTextPolicy::NormalizeLowercase => {
                        String::from(slice.to_ascii_lowercase())
                    }
                };
                (TokenKind::Keyword, text)
            }
            RawToken::Word => (TokenKind::Identifier, String::from(slice)),
            RawToken::Operator => (TokenKind::Operator, String::from(slice)),
            RawToken::Delimiter => (TokenKind::Delimiter, String::from(slice)),
        };
        let span = self.cursor.span(range);
        log::trace!("MATCHED: {:?} {:?} at {}", kind, slice, span.start);

        Ok(Some(Token {
            kind,
            text,
            span: Some(span),
        }))
    }

    fn error_at(&mut self, offset: usize) -> LexicalError {
        let source = self.inner.source();
        let ch = source[offset..].chars().next().unwrap_or('\0');
        let position = self.cursor.advance_to(offset);
        log::debug!("unrecognized character {ch:?} at {position}");
        LexicalError {
            ch,
            offset,
            position,
        }
    }

    /// Tokenizes the entire input into a sequence of [`Token`]s.
    ///
    /// All-or-nothing: the first unrecognized character discards the tokens
    /// scanned so far and is returned as the error.
    pub fn tokenize_all(
        source: &'src str,
        options: LexerOptions,
    ) -> Result<Vec<Token>, LexicalError> {
        let mut lex = Lexer::new(source, options);
        let mut out = Vec::new();
        while let Some(tok) = lex.next_token()? {
            out.push(tok);
        }
        log::debug!("scanned {} tokens", out.len());
        Ok(out)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Scans `source` with the default [`LexerOptions`].
///
/// # Example
/// ```rust
/// # use declex::{scan, TokenKind};
/// let toks = scan("x = 1.5 * (y + 2)").unwrap();
/// assert_eq!(toks.len(), 9);
/// assert_eq!(toks[2].kind, TokenKind::Literal);
/// ```
pub fn scan(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::tokenize_all(source, LexerOptions::default())
}

/// Scans `source` with explicit options.
pub fn scan_with(source: &str, options: LexerOptions) -> Result<Vec<Token>, LexicalError> {
    Lexer::tokenize_all(source, options)
}
