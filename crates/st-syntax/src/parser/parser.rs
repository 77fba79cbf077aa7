//! Main parser implementation.

use drop_bomb::DropBomb;
use text_size::TextRange;
use tracing::{debug, trace};

use crate::lexer::{lexical_error_message, TokenKind};
use crate::parser::event::Event;
use crate::parser::sink::Sink;
use crate::parser::source::Source;
use crate::parser::{Parse, ParseError};
use crate::syntax::SyntaxKind;

/// Parses source text into a syntax tree.
///
/// Never fails: invalid input yields a tree with `Error` nodes plus the
/// corresponding errors.
#[must_use]
pub fn parse(source: &str) -> Parse {
    let mut parser = Parser::new(source);
    parser.parse_source_file();
    let Parser {
        source: token_source,
        events,
        errors: syntax_errors,
        ..
    } = parser;

    let tokens = token_source.finish();
    let green_node = Sink::new(&tokens, source, events).finish();

    let mut errors: Vec<ParseError> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Error)
        .map(|token| {
            ParseError::lexical(lexical_error_message(token.text(source)), token.range)
        })
        .collect();
    errors.extend(syntax_errors);
    errors.sort_by_key(|error| error.range.start());

    debug!(
        tokens = tokens.len(),
        errors = errors.len(),
        "parsed structured text"
    );

    Parse { green_node, errors }
}

/// Deepest statement, expression or type nesting parsed recursively.
const MAX_NESTING: u32 = 256;

/// The parser state.
pub(crate) struct Parser<'src> {
    pub(crate) source: Source<'src>,
    pub(crate) events: Vec<Event>,
    errors: Vec<ParseError>,
    nesting: u32,
}

pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(mut self, parser: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();
        match parser.events.get_mut(self.pos) {
            Some(Event::Placeholder) => {
                parser.events[self.pos] = Event::start(kind);
            }
            Some(Event::Start {
                kind: existing_kind,
                ..
            }) => {
                *existing_kind = kind;
            }
            _ => {}
        }
        parser.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    pub(crate) pos: usize,
}

impl CompletedMarker {
    /// Starts a node that will wrap this completed one.
    pub(crate) fn precede(self, parser: &mut Parser<'_>) -> Marker {
        let new_pos = parser.events.len();
        parser.events.push(Event::Placeholder);
        set_forward_parent(&mut parser.events, self.pos, new_pos);
        Marker {
            pos: new_pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }
}

fn set_forward_parent(events: &mut [Event], from: usize, to: usize) {
    let mut current = from;
    loop {
        match &mut events[current] {
            Event::Start {
                forward_parent: Some(fp),
                ..
            } => {
                current += *fp as usize;
            }
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some((to - current) as u32);
                break;
            }
            _ => break,
        }
    }
}

/// How the top level of a source unit is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopLevel {
    Declarations,
    Block,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source: Source::new(source),
            events: Vec::new(),
            errors: Vec::new(),
            nesting: 0,
        }
    }

    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SourceFile);

        let mode = self.top_level_mode();
        debug!(?mode, "selected top-level mode");
        match mode {
            TopLevel::Declarations => self.parse_declarations(),
            TopLevel::Block => self.parse_top_level_block(),
        }

        self.finish_node();
    }

    /// Decides the mode from the first token that is neither trivia nor a pragma.
    fn top_level_mode(&self) -> TopLevel {
        if self.source.kind_after_pragmas().is_declaration_start() {
            TopLevel::Declarations
        } else {
            TopLevel::Block
        }
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current())
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    pub(crate) fn bump(&mut self) {
        let kind = self.source.current();
        if kind == TokenKind::Eof {
            return;
        }
        trace!(?kind, text = self.source.current_text(), "bump");
        self.events.push(Event::token(SyntaxKind::from(kind)));
        self.source.bump();
    }

    /// Wraps every pragma at the cursor in a `PragmaItem` node.
    pub(crate) fn eat_pragmas(&mut self) {
        while self.at(TokenKind::Pragma) {
            self.start_node(SyntaxKind::PragmaItem);
            self.bump();
            self.finish_node();
        }
    }

    /// Wraps pragmas sitting between the tokens of the construct being
    /// parsed. A run followed by the start of a new block item or
    /// declaration is left to the enclosing list.
    pub(crate) fn eat_inline_pragmas(&mut self) {
        if !self.at(TokenKind::Pragma) {
            return;
        }
        let next = self.source.kind_after_pragmas();
        if next == TokenKind::Eof || next.can_start_statement() || next.is_declaration_start() {
            return;
        }
        self.eat_pragmas();
    }

    /// Returns `true` when the first token after the pragmas at the cursor
    /// matches `pred`.
    pub(crate) fn pragmas_then(&self, pred: impl Fn(TokenKind) -> bool) -> bool {
        pred(self.source.kind_after_pragmas())
    }

    /// Runs `parse` one nesting level deeper. Past `MAX_NESTING` the
    /// construct at the cursor is skipped instead, up to a sync point or a
    /// token in `stop` outside brackets.
    pub(crate) fn nested<T>(
        &mut self,
        stop: &[TokenKind],
        parse: impl FnOnce(&mut Self) -> T,
        skipped: impl FnOnce(CompletedMarker) -> T,
    ) -> T {
        if self.nesting >= MAX_NESTING {
            let error = self.skip_too_deep(stop);
            return skipped(error);
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    /// Records a nesting error and wraps the construct at the cursor,
    /// together with everything nested inside it, in an `Error` node.
    fn skip_too_deep(&mut self, stop: &[TokenKind]) -> CompletedMarker {
        self.error("nesting too deep");
        let marker = self.start();
        let mut depth = 0usize;
        while !self.at_end() {
            let kind = self.current();
            if kind.is_declaration_start() || kind.is_declaration_end() {
                break;
            }
            if matches!(
                kind,
                TokenKind::LParen | TokenKind::LBracket | TokenKind::KwIf | TokenKind::KwCase
            ) {
                depth += 1;
            } else if matches!(
                kind,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::KwEndIf | TokenKind::KwEndCase
            ) {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if depth == 0 && (self.is_sync_point() || self.at_any(stop)) {
                break;
            }
            self.bump();
        }
        marker.complete(self, SyntaxKind::Error)
    }

    /// Consumes `kind` if it is the current token.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `kind`, or reports `message` without consuming anything.
    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(message);
            false
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    pub(crate) fn start_node(&mut self, kind: SyntaxKind) {
        self.events.push(Event::start(kind));
    }

    pub(crate) fn finish_node(&mut self) {
        self.events.push(Event::Finish);
    }

    /// Records a syntax error at the current token.
    ///
    /// Lexer error tokens were already reported when they were lexed, so no
    /// second error is recorded for them. An error repeating the previous
    /// one is dropped.
    pub(crate) fn error(&mut self, message: &str) {
        if self.at(TokenKind::Error) {
            return;
        }
        let range = self.source.current_range();
        let repeated = self
            .errors
            .last()
            .is_some_and(|last| last.range == range && last.message == message);
        if !repeated {
            self.errors.push(ParseError::syntax(message, range));
        }
    }

    /// Records a syntax error covering `range`.
    pub(crate) fn error_at(&mut self, message: &str, range: TextRange) {
        self.errors.push(ParseError::syntax(message, range));
    }

    /// Wraps the current token in an `Error` node.
    pub(crate) fn bump_error(&mut self) {
        self.start_node(SyntaxKind::Error);
        self.bump();
        self.finish_node();
    }

    /// Returns true if the current token is a synchronization point.
    pub(crate) fn is_sync_point(&self) -> bool {
        let kind = self.current();
        kind.is_declaration_start()
            || kind.is_declaration_end()
            || kind.is_var_keyword()
            || matches!(
                kind,
                // Statement terminators
                TokenKind::Semicolon
                // End of control flow
                | TokenKind::KwEndIf
                | TokenKind::KwEndCase
                | TokenKind::KwElsif
                | TokenKind::KwElse
                // End of blocks
                | TokenKind::KwEndVar
                | TokenKind::KwEndStruct
            )
    }

    /// Returns true when a statement list should stop for recovery.
    pub(crate) fn at_stmt_list_end(&self) -> bool {
        self.is_sync_point() && !self.at(TokenKind::Semicolon)
    }

    /// Returns true if a case label starts at the current token.
    pub(crate) fn at_case_label(&self) -> bool {
        matches!(
            self.current(),
            TokenKind::IntLiteral | TokenKind::Minus | TokenKind::Ident
        ) && self.source.has_case_label_ahead()
    }

    /// Wraps tokens up to the next `;` or sync keyword in an `Error` node.
    pub(crate) fn recover_statement(&mut self) {
        if self.at_end() || self.is_sync_point() || self.current().can_start_statement() {
            return;
        }
        self.start_node(SyntaxKind::Error);
        while !self.at_end() && !self.is_sync_point() {
            self.bump();
        }
        self.finish_node();
    }

    /// Consume a statement terminator, or insert it when unambiguous.
    pub(crate) fn expect_semicolon(&mut self) {
        self.eat_inline_pragmas();
        if self.eat(TokenKind::Semicolon) {
            return;
        }

        // A closer reported missing at this token already explains the gap.
        let reported_here = self
            .errors
            .last()
            .is_some_and(|last| last.range.start() == self.source.current_range().start());
        if !reported_here {
            self.error("expected ';'");
        }
        if self.at_semicolon_insertion_point() {
            return;
        }

        self.recover_statement();
        self.eat(TokenKind::Semicolon);
    }

    fn at_semicolon_insertion_point(&self) -> bool {
        if self.at_end() {
            return true;
        }

        if self.is_sync_point()
            || self.current().can_start_statement()
            || self.at(TokenKind::Pragma)
        {
            return true;
        }

        self.at_case_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
        assert_eq!(parse.to_sexp(), "(source_file (block))");
    }

    #[test]
    fn test_parse_simple_program() {
        let source = "PROGRAM Test END_PROGRAM";
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(
            parse.to_sexp(),
            "(source_file (program_declaration (identifier)))"
        );
    }

    #[test]
    fn test_parse_function_block() {
        let source = r#"
FUNCTION_BLOCK FB_Motor
VAR_INPUT
    enable : BOOL;
END_VAR
END_FUNCTION_BLOCK
"#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
    }

    #[test]
    fn test_pragma_before_declaration_keeps_declaration_mode() {
        let parse = parse("{attribute 'x'}\nPROGRAM P END_PROGRAM");
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(
            parse.to_sexp(),
            "(source_file (pragma) (program_declaration (identifier)))"
        );
    }

    #[test]
    fn test_missing_semicolon_insertion() {
        let parse = parse("x := 1\ny := 2;");
        assert_eq!(parse.errors().len(), 1, "errors: {:?}", parse.errors());
        assert_eq!(parse.errors()[0].message, "expected ';'");
        assert_eq!(
            parse.to_sexp(),
            "(source_file (block (assignment (identifier) (integer_literal)) (assignment (identifier) (integer_literal))))"
        );
    }

    #[test]
    fn test_missing_end_case_recovery() {
        let source = r#"
PROGRAM Test
    CASE x OF
        0: y := 1;
END_PROGRAM
"#;
        let parse = parse(source);
        assert!(!parse.ok(), "expected errors for missing END_CASE");
        assert!(
            parse
                .errors()
                .iter()
                .any(|error| error.message == "expected END_CASE"),
            "errors: {:?}",
            parse.errors()
        );
        assert!(
            !parse
                .errors()
                .iter()
                .any(|error| error.message == "expected END_PROGRAM"),
            "errors: {:?}",
            parse.errors()
        );
    }

    #[test]
    fn test_lexical_error_reported_once() {
        let parse = parse("x := @;");
        assert_eq!(parse.errors().len(), 1, "errors: {:?}", parse.errors());
        assert_eq!(parse.errors()[0].message, "unrecognized input");
        assert_eq!(parse.errors()[0].kind, crate::parser::ParseErrorKind::Lexical);
    }
}
