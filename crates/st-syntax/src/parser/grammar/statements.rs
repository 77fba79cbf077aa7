//! Statement parsing for IEC 61131-3 Structured Text.
//!
//! Supported statements:
//! - Assignment: `x := expr;`
//! - Function block invocation: `fb(a := 1, done => ok);`
//! - IF/ELSIF/ELSE/END_IF
//! - CASE/OF/END_CASE
//! - RETURN
//! - Empty statement: `;`
//!
//! A statement's terminating `;` belongs to the enclosing `Block`, not to the
//! statement node.

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

/// Keywords that close an `IF` branch.
const IF_BRANCH_END: &[TokenKind] = &[TokenKind::KwElsif, TokenKind::KwElse, TokenKind::KwEndIf];

/// Keywords that close a `CASE` item body.
const CASE_ITEM_END: &[TokenKind] = &[TokenKind::KwElse, TokenKind::KwEndCase];

impl Parser<'_> {
    /// Parse the whole input as a single bare block.
    pub(crate) fn parse_top_level_block(&mut self) {
        self.start_node(SyntaxKind::Block);
        self.parse_block_items(&[], false);
        self.finish_node();

        if !self.at_end() {
            // Only a declaration keyword ends a top-level block early.
            self.error("declarations cannot be mixed with statements");
            self.start_node(SyntaxKind::Error);
            while !self.at_end() {
                self.bump();
            }
            self.finish_node();
        }
    }

    /// Parse a `Block` that ends before any token in `stop`.
    ///
    /// With `case_labels` set, the block also ends where the next case label
    /// starts.
    pub(crate) fn parse_block(&mut self, stop: &[TokenKind], case_labels: bool) {
        self.start_node(SyntaxKind::Block);
        self.parse_block_items(stop, case_labels);
        self.finish_node();
    }

    /// Returns `true` if a block governed by `stop` ends at the current token.
    pub(crate) fn at_block_end(&self, stop: &[TokenKind], case_labels: bool) -> bool {
        if self.at_end() || self.at_any(stop) || self.current().is_declaration_start() {
            return true;
        }
        if case_labels && self.at_case_label() {
            return true;
        }
        // Nested blocks leave unknown closers to the enclosing construct.
        !stop.is_empty() && self.at_stmt_list_end()
    }

    fn parse_block_items(&mut self, stop: &[TokenKind], case_labels: bool) {
        while !self.at_block_end(stop, case_labels) {
            self.parse_block_item();
        }
    }

    /// Parse one block entry: a terminated statement, a noop or a pragma.
    fn parse_block_item(&mut self) {
        match self.current() {
            TokenKind::Semicolon => {
                self.start_node(SyntaxKind::Noop);
                self.bump();
                self.finish_node();
            }
            TokenKind::Pragma => self.eat_pragmas(),
            TokenKind::Error => self.bump_error(),
            kind if kind.can_start_statement() => {
                self.parse_statement();
                self.expect_semicolon();
            }
            _ => {
                self.error("expected statement");
                self.start_node(SyntaxKind::Error);
                self.bump();
                while !self.at_end()
                    && !self.is_sync_point()
                    && !self.current().can_start_statement()
                    && !self.at(TokenKind::Pragma)
                {
                    self.bump();
                }
                self.finish_node();
            }
        }
    }

    /// Parse a single statement, without its terminator.
    pub(crate) fn parse_statement(&mut self) {
        self.nested(&[], Self::parse_statement_inner, |_| ());
    }

    fn parse_statement_inner(&mut self) {
        match self.current() {
            TokenKind::KwIf => self.parse_if_statement(),
            TokenKind::KwCase => self.parse_case_statement(),
            TokenKind::KwReturn => self.parse_return_statement(),
            TokenKind::Ident => self.parse_assignment_or_invocation(),
            _ => {
                self.error("expected statement");
                self.recover_statement();
            }
        }
    }

    fn parse_assignment_or_invocation(&mut self) {
        let target = self.parse_name_ref();
        let marker = target.precede(self);
        self.eat_inline_pragmas();
        match self.current() {
            TokenKind::Assign => {
                self.bump();
                self.parse_expression();
                marker.complete(self, SyntaxKind::Assignment);
            }
            TokenKind::LParen => {
                self.parse_argument_list();
                marker.complete(self, SyntaxKind::FbInvocation);
            }
            _ => {
                self.error("expected ':=' or '('");
                marker.complete(self, SyntaxKind::Error);
            }
        }
    }

    /// Parse IF statement.
    fn parse_if_statement(&mut self) {
        self.start_node(SyntaxKind::IfStatement);
        self.bump(); // IF

        self.parse_expression(); // condition
        self.expect(TokenKind::KwThen, "expected THEN");
        self.parse_block(IF_BRANCH_END, false);

        while self.at(TokenKind::KwElsif) {
            self.start_node(SyntaxKind::ElsifClause);
            self.bump();
            self.parse_expression();
            self.expect(TokenKind::KwThen, "expected THEN");
            self.parse_block(IF_BRANCH_END, false);
            self.finish_node();
        }

        if self.at(TokenKind::KwElse) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.parse_block(&[TokenKind::KwEndIf], false);
            self.finish_node();
        }

        self.expect(TokenKind::KwEndIf, "expected END_IF");
        self.finish_node();
    }

    /// Parse CASE statement.
    fn parse_case_statement(&mut self) {
        self.start_node(SyntaxKind::CaseStatement);
        self.bump(); // CASE

        self.parse_expression(); // value
        self.expect(TokenKind::KwOf, "expected OF");

        loop {
            if self.at(TokenKind::Pragma) {
                self.eat_pragmas();
            } else if self.at_case_label() {
                self.parse_case_item();
            } else if self.at_any(CASE_ITEM_END) || self.at_end() || self.at_stmt_list_end() {
                break;
            } else {
                self.error("expected case label");
                self.start_node(SyntaxKind::Error);
                while !self.at_end()
                    && !self.at_any(CASE_ITEM_END)
                    && !self.at_case_label()
                    && !self.at_stmt_list_end()
                {
                    self.bump();
                }
                self.finish_node();
            }
        }

        if self.at(TokenKind::KwElse) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.parse_block(&[TokenKind::KwEndCase], false);
            self.finish_node();
        }

        self.expect(TokenKind::KwEndCase, "expected END_CASE");
        self.finish_node();
    }

    /// Parse `label, label..label: body`.
    fn parse_case_item(&mut self) {
        self.start_node(SyntaxKind::CaseItem);

        self.parse_case_label();
        self.eat_inline_pragmas();
        while self.eat(TokenKind::Comma) {
            self.eat_pragmas();
            self.parse_case_label();
            self.eat_inline_pragmas();
        }
        self.expect(TokenKind::Colon, "expected ':'");
        self.parse_block(CASE_ITEM_END, true);

        self.finish_node();
    }

    fn parse_case_label(&mut self) {
        self.start_node(SyntaxKind::CaseLabel);
        self.parse_case_label_value();
        self.eat_inline_pragmas();
        if self.eat(TokenKind::DotDot) {
            self.eat_pragmas();
            self.parse_case_label_value();
        }
        self.finish_node();
    }

    fn parse_case_label_value(&mut self) {
        match (self.current(), self.peek_kind_n(1)) {
            (TokenKind::IntLiteral, _) => {
                self.start_node(SyntaxKind::IntegerLiteral);
                self.bump();
                self.finish_node();
            }
            (TokenKind::Minus, TokenKind::IntLiteral) => {
                self.start_node(SyntaxKind::UnaryExpression);
                self.bump();
                self.start_node(SyntaxKind::IntegerLiteral);
                self.bump();
                self.finish_node();
                self.finish_node();
            }
            (TokenKind::Ident, _) => {
                self.parse_name_ref();
            }
            _ => {
                self.error("expected case label");
                self.start_node(SyntaxKind::Error);
                if !self.at_end()
                    && !self.is_sync_point()
                    && !self.at_any(&[TokenKind::Colon, TokenKind::Comma, TokenKind::DotDot])
                {
                    self.bump();
                }
                self.finish_node();
            }
        }
    }

    /// Parse RETURN statement.
    fn parse_return_statement(&mut self) {
        self.start_node(SyntaxKind::ReturnStatement);
        self.bump(); // RETURN
        if self.current().can_start_expr() {
            self.parse_expression();
        }
        self.finish_node();
    }
}
