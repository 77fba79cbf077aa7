//! Lexer for IEC 61131-3 Structured Text.
//!
//! This module provides a lexer that tokenizes ST source code into a stream
//! of tokens with their positions in the source text.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use std::collections::VecDeque;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Returns the text of this token within `source`.
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.range]
    }
}

/// Lexer for Structured Text source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized characters are returned as `TokenKind::Error`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    pending: VecDeque<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            pending: VecDeque::new(),
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the text of the current token.
    #[must_use]
    pub fn slice(&self) -> &'src str {
        self.inner.slice()
    }
}

fn text_range(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        let kind = self.inner.next()?;
        let span = self.inner.span();
        let kind = kind.unwrap_or(TokenKind::Error);

        // `1..5` lexes as the real `1.` followed by `.5`; split it back into
        // an integer and a range operator.
        if kind == TokenKind::RealLiteral {
            let text = &self.source[span.clone()];
            let followed_by_dot = self.source.as_bytes().get(span.end) == Some(&b'.');
            if text.ends_with('.') && followed_by_dot {
                let dot_start = span.end - 1;
                self.inner.bump(1);
                self.pending.push_back(Token::new(
                    TokenKind::DotDot,
                    text_range(dot_start, span.end + 1),
                ));
                return Some(Token::new(
                    TokenKind::IntLiteral,
                    text_range(span.start, dot_start),
                ));
            }
        }

        Some(Token::new(kind, text_range(span.start, span.end)))
    }
}

/// Describes why `text` was lexed as [`TokenKind::Error`].
#[must_use]
pub fn lexical_error_message(text: &str) -> &'static str {
    if text.starts_with("T#") || text.starts_with("t#") {
        "malformed time literal"
    } else if text.starts_with('\'') {
        "unterminated string literal"
    } else if text.starts_with("(*") {
        "unterminated block comment"
    } else if text.starts_with('{') {
        "unterminated pragma"
    } else {
        "unrecognized input"
    }
}

/// Lex the entire source and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| (token, token.text(source)))
        .collect()
}
