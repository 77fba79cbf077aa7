//! Declaration parsing for IEC 61131-3 Structured Text.
//!
//! Handles:
//! - Variable sections (VAR, VAR_INPUT, VAR_OUTPUT, etc., optionally CONSTANT)
//! - Variable declarations with optional initializer
//! - Type declarations (TYPE...END_TYPE) with struct definitions
//! - Array types, including multi-dimensional and nested ones

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

impl Parser<'_> {
    /// Parse a variable section: `VAR [CONSTANT] ... END_VAR`.
    pub(crate) fn parse_var_section(&mut self) {
        self.start_node(SyntaxKind::VarSection);
        self.bump(); // VAR, VAR_INPUT, ...
        self.eat(TokenKind::KwConstant);

        loop {
            if self.at_end() || self.at(TokenKind::KwEndVar) {
                break;
            }
            match self.current() {
                TokenKind::Ident => self.parse_var_decl(SyntaxKind::VarDecl),
                TokenKind::Pragma if self.pragmas_then(|kind| kind == TokenKind::Ident) => {
                    self.parse_var_decl(SyntaxKind::VarDecl);
                }
                TokenKind::Pragma => self.eat_pragmas(),
                TokenKind::Error => self.bump_error(),
                _ if self.at_stmt_list_end() => break,
                _ => {
                    self.error("expected variable declaration");
                    self.recover_declaration(TokenKind::KwEndVar);
                }
            }
        }

        self.expect(TokenKind::KwEndVar, "expected END_VAR");
        self.finish_node();
    }

    /// Parse `[pragmas] name[, name]* : type [:= init];` as a node of `kind`.
    ///
    /// Struct fields take a single name.
    fn parse_var_decl(&mut self, kind: SyntaxKind) {
        self.start_node(kind);

        self.eat_pragmas();

        self.parse_identifier();
        self.eat_inline_pragmas();
        if kind == SyntaxKind::VarDecl {
            while self.eat(TokenKind::Comma) {
                if self.at(TokenKind::Ident) {
                    self.parse_identifier();
                } else {
                    self.error("expected variable name");
                    break;
                }
                self.eat_inline_pragmas();
            }
        }

        if self.eat(TokenKind::Colon) {
            self.parse_type_name();
        } else {
            self.error("expected ':'");
            if self.at_type_name() {
                self.parse_type_name();
            }
        }

        self.eat_inline_pragmas();
        if self.eat(TokenKind::Assign) {
            self.parse_expression();
        }

        self.eat_inline_pragmas();
        self.expect(TokenKind::Semicolon, "expected ';'");
        self.finish_node();
    }

    /// Wraps a malformed declaration in an `Error` node, up to and
    /// including the next `;`.
    fn recover_declaration(&mut self, end: TokenKind) {
        self.start_node(SyntaxKind::Error);
        while !self.at_end() && !self.at(end) && !self.at_stmt_list_end() {
            if self.eat(TokenKind::Semicolon) {
                break;
            }
            self.bump();
            if self.at(TokenKind::Ident) {
                break;
            }
        }
        self.finish_node();
    }

    fn at_type_name(&self) -> bool {
        matches!(self.current(), TokenKind::Ident | TokenKind::KwArray)
    }

    /// Parse a type name: an identifier or an array type.
    pub(crate) fn parse_type_name(&mut self) {
        self.eat_pragmas();
        self.nested(&[TokenKind::Assign], Self::parse_type_name_inner, |_| ());
    }

    fn parse_type_name_inner(&mut self) {
        match self.current() {
            TokenKind::Ident => {
                self.parse_identifier();
            }
            TokenKind::KwArray => self.parse_array_type(),
            _ => self.error("expected type name"),
        }
    }

    /// Parse `ARRAY [lo..hi, ...] OF type`.
    fn parse_array_type(&mut self) {
        self.start_node(SyntaxKind::ArrayType);
        self.bump(); // ARRAY

        if self.expect(TokenKind::LBracket, "expected '['") {
            self.parse_array_range();
            while self.eat(TokenKind::Comma) {
                self.parse_array_range();
            }
            self.expect(TokenKind::RBracket, "expected ']'");
        }

        self.expect(TokenKind::KwOf, "expected OF");
        self.parse_type_name();

        self.finish_node();
    }

    fn parse_array_range(&mut self) {
        self.start_node(SyntaxKind::ArrayRange);
        self.parse_expression();
        if self.expect(TokenKind::DotDot, "expected '..'") {
            self.parse_expression();
        }
        self.finish_node();
    }

    /// Parse `TYPE name : STRUCT ... END_STRUCT [;] END_TYPE`.
    pub(crate) fn parse_type_declaration(&mut self) {
        self.start_node(SyntaxKind::TypeDeclaration);
        self.bump(); // TYPE

        if self.at(TokenKind::Ident) {
            self.parse_identifier();
        } else {
            self.error("expected type name");
        }

        self.expect(TokenKind::Colon, "expected ':'");

        if self.at(TokenKind::KwStruct) {
            self.parse_struct_definition();
        } else {
            self.error("expected STRUCT");
            if self.at_type_name() {
                self.parse_type_name();
            }
        }

        self.eat(TokenKind::Semicolon);
        self.expect(TokenKind::KwEndType, "expected END_TYPE");
        self.finish_node();
    }

    /// Parse a STRUCT definition.
    fn parse_struct_definition(&mut self) {
        self.start_node(SyntaxKind::StructDefinition);
        self.bump(); // STRUCT

        loop {
            if self.at_end() || self.at(TokenKind::KwEndStruct) {
                break;
            }
            match self.current() {
                TokenKind::Ident => self.parse_var_decl(SyntaxKind::StructField),
                TokenKind::Pragma if self.pragmas_then(|kind| kind == TokenKind::Ident) => {
                    self.parse_var_decl(SyntaxKind::StructField);
                }
                TokenKind::Pragma => self.eat_pragmas(),
                TokenKind::Error => self.bump_error(),
                _ if self.at_stmt_list_end() => break,
                _ => {
                    self.error("expected struct field");
                    self.recover_declaration(TokenKind::KwEndStruct);
                }
            }
        }

        self.expect(TokenKind::KwEndStruct, "expected END_STRUCT");
        self.finish_node();
    }
}
