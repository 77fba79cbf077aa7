//! Token source for the parser.
//!
//! `Source` pulls tokens from the lexer only as far as the parser looks
//! ahead, and provides trivia-skipping lookahead and consumption.

use std::cell::RefCell;

use text_size::{TextRange, TextSize};

use crate::lexer::{Lexer, Token, TokenKind};

/// A token source that provides tokens to the parser.
pub struct Source<'src> {
    lexer: RefCell<Lexer<'src>>,
    tokens: RefCell<Vec<Token>>,
    source: &'src str,
    cursor: usize,
    prev_range: TextRange,
}

impl<'src> Source<'src> {
    /// Creates a new source over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: RefCell::new(Lexer::new(source)),
            tokens: RefCell::new(Vec::new()),
            source,
            cursor: 0,
            prev_range: TextRange::empty(TextSize::from(0)),
        }
    }

    /// Returns the token at raw index `index`, pulling from the lexer if needed.
    fn token_at(&self, index: usize) -> Option<Token> {
        if let Some(token) = self.tokens.borrow().get(index) {
            return Some(*token);
        }
        let mut lexer = self.lexer.borrow_mut();
        let mut tokens = self.tokens.borrow_mut();
        while tokens.len() <= index {
            let token = lexer.next()?;
            tokens.push(token);
        }
        tokens.get(index).copied()
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current non-trivia token, or `None` if at end.
    pub fn current_token(&self) -> Option<Token> {
        self.peek_token_n(0)
    }

    /// Peeks at the nth non-trivia token ahead (0 = current).
    pub fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.peek_token_n(n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Peeks at the nth non-trivia token ahead and returns the token.
    pub fn peek_token_n(&self, n: usize) -> Option<Token> {
        let mut cursor = self.cursor;
        let mut non_trivia_seen = 0;

        while let Some(token) = self.token_at(cursor) {
            if !token.kind.is_trivia() {
                if non_trivia_seen == n {
                    return Some(token);
                }
                non_trivia_seen += 1;
            }
            cursor += 1;
        }

        None
    }

    /// Returns the kind of the first token at or after the cursor that is
    /// neither trivia nor a pragma.
    pub fn kind_after_pragmas(&self) -> TokenKind {
        let mut cursor = self.cursor;
        while let Some(token) = self.token_at(cursor) {
            if !token.kind.is_trivia() && token.kind != TokenKind::Pragma {
                return token.kind;
            }
            cursor += 1;
        }
        TokenKind::Eof
    }

    /// Advances past the current non-trivia token.
    pub fn bump(&mut self) {
        while let Some(token) = self.token_at(self.cursor) {
            self.cursor += 1;
            if !token.kind.is_trivia() {
                self.prev_range = token.range;
                break;
            }
        }
    }

    /// Returns `true` if at end of input.
    pub fn at_end(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    /// Returns the text of the current token.
    pub fn current_text(&self) -> &'src str {
        self.current_token()
            .map_or("", |token| token.text(self.source))
    }

    /// Returns the range of the current token, or an empty range at the end
    /// of input.
    pub fn current_range(&self) -> TextRange {
        self.current_token().map_or_else(
            || TextRange::empty(TextSize::of(self.source)),
            |token| token.range,
        )
    }

    /// Returns the range of the last consumed non-trivia token.
    pub fn prev_range(&self) -> TextRange {
        self.prev_range
    }

    /// Returns `true` if `:` follows at nesting depth zero before the end of
    /// the current statement, i.e. a case label starts here.
    pub fn has_case_label_ahead(&self) -> bool {
        let mut cursor = self.cursor;
        let mut paren_depth = 0u32;
        let mut bracket_depth = 0u32;

        while let Some(token) = self.token_at(cursor) {
            cursor += 1;

            if token.kind.is_trivia() {
                continue;
            }

            match token.kind {
                TokenKind::LParen => paren_depth += 1,
                TokenKind::RParen => paren_depth = paren_depth.saturating_sub(1),
                TokenKind::LBracket => bracket_depth += 1,
                TokenKind::RBracket => bracket_depth = bracket_depth.saturating_sub(1),
                TokenKind::Colon if paren_depth == 0 && bracket_depth == 0 => return true,
                TokenKind::Semicolon
                | TokenKind::Assign
                | TokenKind::KwThen
                | TokenKind::KwOf
                | TokenKind::KwElse
                | TokenKind::KwElsif
                | TokenKind::KwEndIf
                | TokenKind::KwEndCase
                | TokenKind::KwEndFunctionBlock
                | TokenKind::KwEndFunction
                | TokenKind::KwEndProgram
                    if paren_depth == 0 && bracket_depth == 0 =>
                {
                    return false;
                }
                _ => {}
            }
        }

        false
    }

    /// Drains the lexer and returns every token, trivia included.
    pub fn finish(self) -> Vec<Token> {
        let mut tokens = self.tokens.into_inner();
        tokens.extend(self.lexer.into_inner());
        tokens
    }
}
