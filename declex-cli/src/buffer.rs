//! Caller-held token accumulation.
//!
//! The core stages are pure; a session that feeds the lexer several source
//! fragments keeps their tokens here. Whether a token whose text was already
//! seen is appended again is governed by [`DedupPolicy`].
use declex::{Token, TokenKind};
use std::collections::HashSet;

/// What to do with a token whose text already occurs in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DedupPolicy {
    /// Append every token.
    #[default]
    KeepAll,
    /// Skip a token if any earlier token has the same text, regardless of
    /// kind (so a literal `1` and a later `1` collapse, and so do repeated
    /// delimiters).
    SkipRepeatedText,
}

/// An append-only, ordered collection of tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    seen: HashSet<smartstring::alias::String>,
    policy: DedupPolicy,
}

impl TokenBuffer {
    /// Creates an empty buffer applying `policy`.
    pub fn new(policy: DedupPolicy) -> Self {
        Self {
            tokens: Vec::new(),
            seen: HashSet::new(),
            policy,
        }
    }

    /// The de-duplication policy in force.
    pub fn policy(&self) -> DedupPolicy {
        self.policy
    }

    /// Appends `tokens` in order and returns how many were kept.
    ///
    /// End-of-input markers are never stored.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> usize {
        let mut added = 0;
        for tok in tokens {
            if tok.kind == TokenKind::EndOfInput {
                continue;
            }
            let fresh = self.seen.insert(tok.text.clone());
            if !fresh && self.policy == DedupPolicy::SkipRepeatedText {
                log::trace!("skipping repeated {tok}");
                continue;
            }
            self.tokens.push(tok);
            added += 1;
        }
        added
    }

    /// Empties the buffer, forgetting every text seen so far.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.seen.clear();
    }

    /// Buffered tokens in append order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of buffered tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no token is buffered.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens of one kind, in buffer order.
    pub fn by_kind(&self, kind: TokenKind) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use declex::scan;

    fn texts(buf: &TokenBuffer) -> Vec<&str> {
        buf.tokens().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn keep_all_appends_everything() {
        let mut buf = TokenBuffer::new(DedupPolicy::KeepAll);
        assert_eq!(buf.extend(scan("a + a").unwrap()), 3);
        assert_eq!(buf.extend(scan("a ;").unwrap()), 2);
        assert_eq!(texts(&buf), vec!["a", "+", "a", "a", ";"]);
    }

    #[test]
    fn skip_repeated_text_across_fragments() {
        let mut buf = TokenBuffer::new(DedupPolicy::SkipRepeatedText);
        assert_eq!(buf.extend(scan("int a = 1 ;").unwrap()), 5);
        assert_eq!(buf.extend(scan("int b = 1 ;").unwrap()), 1);
        assert_eq!(texts(&buf), vec!["int", "a", "=", "1", ";", "b"]);
    }

    #[test]
    fn skip_repeated_text_ignores_kind() {
        let mut buf = TokenBuffer::new(DedupPolicy::SkipRepeatedText);
        buf.extend(vec![
            Token::new(TokenKind::Identifier, "x"),
            Token::new(TokenKind::Literal, "x"),
        ]);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn end_markers_are_dropped() {
        let mut buf = TokenBuffer::default();
        let added = buf.extend(vec![
            Token::new(TokenKind::Literal, "1"),
            Token::end_of_input(),
        ]);
        assert_eq!(added, 1);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn clear_forgets_seen_texts() {
        let mut buf = TokenBuffer::new(DedupPolicy::SkipRepeatedText);
        buf.extend(scan("a b").unwrap());
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.extend(scan("a").unwrap()), 1);
    }

    #[test]
    fn by_kind_filters_in_order() {
        let mut buf = TokenBuffer::default();
        buf.extend(scan("int x = y + 2 ;").unwrap());
        let ids: Vec<&str> = buf
            .by_kind(TokenKind::Identifier)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(ids, vec!["x", "y"]);
        assert_eq!(buf.by_kind(TokenKind::Delimiter).count(), 2);
    }
}
