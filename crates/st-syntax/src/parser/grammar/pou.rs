//! Program Organization Unit parsing.
//!
//! Handles the declaration-mode top level:
//! - PROGRAM/END_PROGRAM
//! - FUNCTION/END_FUNCTION
//! - FUNCTION_BLOCK/END_FUNCTION_BLOCK
//! - TYPE/END_TYPE (see `declarations.rs`)
//! - pragmas between declarations

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::Parser;

/// Static description of one POU kind.
struct Pou {
    node: SyntaxKind,
    end: TokenKind,
    name_message: &'static str,
    end_message: &'static str,
    return_type: bool,
}

const PROGRAM: Pou = Pou {
    node: SyntaxKind::ProgramDeclaration,
    end: TokenKind::KwEndProgram,
    name_message: "expected program name",
    end_message: "expected END_PROGRAM",
    return_type: false,
};

const FUNCTION: Pou = Pou {
    node: SyntaxKind::FunctionDeclaration,
    end: TokenKind::KwEndFunction,
    name_message: "expected function name",
    end_message: "expected END_FUNCTION",
    return_type: true,
};

const FUNCTION_BLOCK: Pou = Pou {
    node: SyntaxKind::FunctionBlockDeclaration,
    end: TokenKind::KwEndFunctionBlock,
    name_message: "expected function block name",
    end_message: "expected END_FUNCTION_BLOCK",
    return_type: false,
};

impl Parser<'_> {
    /// Parse a sequence of top-level declarations.
    pub(crate) fn parse_declarations(&mut self) {
        while !self.at_end() {
            match self.current() {
                TokenKind::KwFunctionBlock => self.parse_pou(&FUNCTION_BLOCK),
                TokenKind::KwFunction => self.parse_pou(&FUNCTION),
                TokenKind::KwProgram => self.parse_pou(&PROGRAM),
                TokenKind::KwType => self.parse_type_declaration(),
                TokenKind::Pragma => self.eat_pragmas(),
                TokenKind::Error => self.bump_error(),
                _ => {
                    self.error("expected FUNCTION_BLOCK, FUNCTION, PROGRAM, or TYPE");
                    self.start_node(SyntaxKind::Error);
                    self.bump();
                    while !self.at_end()
                        && !self.current().is_declaration_start()
                        && !self.at_any(&[TokenKind::Pragma, TokenKind::Error])
                    {
                        self.bump();
                    }
                    self.finish_node();
                }
            }
        }
    }

    /// Parse a PROGRAM, FUNCTION or FUNCTION_BLOCK declaration.
    fn parse_pou(&mut self, pou: &Pou) {
        self.start_node(pou.node);
        self.bump(); // keyword

        if self.at(TokenKind::Ident) {
            self.parse_identifier();
        } else {
            self.error(pou.name_message);
        }

        if pou.return_type && self.eat(TokenKind::Colon) {
            self.parse_type_name();
        }

        self.parse_var_sections();

        let stop = [pou.end];
        if !self.at_block_end(&stop, false) {
            self.parse_block(&stop, false);
        }

        self.expect(pou.end, pou.end_message);
        self.finish_node();
    }

    /// Parse variable sections in any order, with the pragmas between them.
    fn parse_var_sections(&mut self) {
        loop {
            if self.current().is_var_keyword() {
                self.parse_var_section();
            } else if self.at(TokenKind::Pragma) && self.pragmas_then(TokenKind::is_var_keyword) {
                self.eat_pragmas();
            } else {
                break;
            }
        }
    }
}
