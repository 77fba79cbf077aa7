//! Expression parsing using precedence climbing.
//!
//! Operator precedence (low to high):
//! - OR (0)
//! - XOR (1)
//! - AND (2)
//! - =, <> (10)
//! - <, <=, >, >= (11)
//! - +, - (20)
//! - *, /, MOD (21)
//! - ** (22, right associative)
//! - NOT, unary - (30)
//!
//! Everything else is left associative.
//!
//! Pragmas between operands and operators become `PragmaItem` children of
//! the node being built.

use text_size::TextRange;

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::super::CompletedMarker;
use super::super::Parser;

/// Tokens that end an expression cut off for nesting too deep.
const EXPR_END: &[TokenKind] = &[
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::DotDot,
    TokenKind::KwThen,
    TokenKind::KwOf,
];

/// Shape of a parsed argument list.
pub(crate) struct Arguments {
    pub(crate) count: usize,
    pub(crate) all_positional: bool,
}

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> CompletedMarker {
        self.parse_expr_prec(0)
    }

    /// Parse an expression whose binary operators bind at least as tightly
    /// as `min_prec`.
    fn parse_expr_prec(&mut self, min_prec: u8) -> CompletedMarker {
        self.eat_pragmas();
        self.nested(EXPR_END, |p| p.parse_operation(min_prec), |error| error)
    }

    fn parse_operation(&mut self, min_prec: u8) -> CompletedMarker {
        let mut lhs = if let Some(prec) = self.current().prefix_precedence() {
            let marker = self.start();
            self.bump();
            self.parse_expr_prec(prec);
            marker.complete(self, SyntaxKind::UnaryExpression)
        } else {
            self.parse_primary_expr()
        };

        loop {
            self.eat_inline_pragmas();
            let Some((prec, right_assoc)) = self.current().infix_precedence() else {
                break;
            };
            if prec < min_prec {
                break;
            }

            let kind = binary_node_kind(self.current());
            let marker = lhs.precede(self);
            self.bump(); // operator
            let next_min = if right_assoc { prec } else { prec + 1 };
            self.parse_expr_prec(next_min);
            lhs = marker.complete(self, kind);
        }

        lhs
    }

    /// Parse primary expressions (literals, names, calls, parentheses).
    fn parse_primary_expr(&mut self) -> CompletedMarker {
        let literal = match self.current() {
            TokenKind::IntLiteral => Some(SyntaxKind::IntegerLiteral),
            TokenKind::RealLiteral => Some(SyntaxKind::FloatLiteral),
            TokenKind::TimeLiteral => Some(SyntaxKind::TimeLiteralExpr),
            TokenKind::StringLiteral => Some(SyntaxKind::StringLiteralExpr),
            TokenKind::KwTrue | TokenKind::KwFalse => Some(SyntaxKind::BooleanLiteral),
            _ => None,
        };
        if let Some(kind) = literal {
            let marker = self.start();
            self.bump();
            return marker.complete(self, kind);
        }

        match self.current() {
            TokenKind::Ident => self.parse_name_or_call(),
            TokenKind::LParen => {
                let marker = self.start();
                self.bump();
                self.parse_expression();
                self.expect(TokenKind::RParen, "expected ')'");
                marker.complete(self, SyntaxKind::ParenthesizedExpression)
            }
            TokenKind::Error => {
                let marker = self.start();
                self.bump();
                marker.complete(self, SyntaxKind::Error)
            }
            _ => {
                let marker = self.start();
                self.error("expected expression");
                if !self.at_end() && !self.at_expr_recovery_point() {
                    self.bump();
                }
                marker.complete(self, SyntaxKind::Error)
            }
        }
    }

    /// Tokens an operand error leaves in place for the enclosing construct.
    fn at_expr_recovery_point(&self) -> bool {
        self.is_sync_point()
            || self.at_any(&[
                TokenKind::RParen,
                TokenKind::RBracket,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::DotDot,
                TokenKind::KwThen,
                TokenKind::KwOf,
            ])
    }

    /// Parse a single `Identifier` node.
    pub(crate) fn parse_identifier(&mut self) -> CompletedMarker {
        let marker = self.start();
        self.bump();
        marker.complete(self, SyntaxKind::Identifier)
    }

    /// Parse an identifier or a dotted `QualifiedIdentifier`.
    pub(crate) fn parse_name_ref(&mut self) -> CompletedMarker {
        let first = self.parse_identifier();
        if !self.at(TokenKind::Dot) {
            return first;
        }

        let marker = first.precede(self);
        while self.eat(TokenKind::Dot) {
            if self.at(TokenKind::Ident) {
                self.parse_identifier();
            } else {
                self.error("expected identifier after '.'");
                break;
            }
        }
        marker.complete(self, SyntaxKind::QualifiedIdentifier)
    }

    /// Parse a name, which becomes a call when followed by `(`.
    fn parse_name_or_call(&mut self) -> CompletedMarker {
        let conversion = is_type_conversion_name(self.source.current_text())
            && self.peek_kind_n(1) == TokenKind::LParen;
        let name = self.parse_name_ref();
        if !self.at(TokenKind::LParen) {
            return name;
        }

        let marker = name.precede(self);
        let start = self.source.current_range().start();
        let arguments = self.parse_argument_list();
        if conversion {
            if arguments.count != 1 || !arguments.all_positional {
                let range = TextRange::new(start, self.source.prev_range().end());
                self.error_at("type conversion takes exactly one positional argument", range);
            }
            marker.complete(self, SyntaxKind::TypeConversion)
        } else {
            marker.complete(self, SyntaxKind::FunctionCall)
        }
    }

    /// Parse a parenthesized argument list for calls and invocations.
    pub(crate) fn parse_argument_list(&mut self) -> Arguments {
        let mut arguments = Arguments {
            count: 0,
            all_positional: true,
        };

        self.start_node(SyntaxKind::ArgumentList);
        self.bump(); // (

        self.eat_pragmas();
        if !self.at(TokenKind::RParen) {
            loop {
                arguments.count += 1;
                if !self.parse_param_assignment() {
                    arguments.all_positional = false;
                }
                self.eat_inline_pragmas();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
                self.eat_pragmas();
            }
        }

        self.expect(TokenKind::RParen, "expected ')'");
        self.finish_node();
        arguments
    }

    /// Parse one argument. Returns `true` for a positional argument.
    fn parse_param_assignment(&mut self) -> bool {
        self.start_node(SyntaxKind::ParamAssignment);

        let positional = match (self.current(), self.peek_kind_n(1), self.peek_kind_n(2)) {
            (TokenKind::Ident, TokenKind::Assign, _) => {
                self.parse_identifier();
                self.bump(); // :=
                self.parse_expression();
                false
            }
            (TokenKind::Ident, TokenKind::Arrow, _) => {
                self.parse_identifier();
                self.bump(); // =>
                self.parse_output_target();
                false
            }
            (TokenKind::KwNot, TokenKind::Ident, TokenKind::Arrow) => {
                self.bump(); // NOT
                self.parse_identifier();
                self.bump(); // =>
                self.parse_output_target();
                false
            }
            _ => {
                self.parse_expression();
                true
            }
        };

        self.finish_node();
        positional
    }

    fn parse_output_target(&mut self) {
        if self.at(TokenKind::Ident) {
            self.parse_name_ref();
        } else {
            self.error("expected output variable after '=>'");
        }
    }
}

fn binary_node_kind(op: TokenKind) -> SyntaxKind {
    if op.is_boolean_op() {
        SyntaxKind::BooleanOperator
    } else if op.is_equality_op() {
        SyntaxKind::EqualityOperator
    } else if op.is_comparison_op() {
        SyntaxKind::ComparisonOperator
    } else {
        SyntaxKind::BinaryOperator
    }
}

/// Returns `true` for names of the form `SOURCE_TO_TARGET`, both parts
/// upper-case ASCII letters.
fn is_type_conversion_name(name: &str) -> bool {
    let is_type = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_uppercase());
    name.split_once("_TO_")
        .is_some_and(|(source, target)| is_type(source) && is_type(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_conversion_names() {
        assert!(is_type_conversion_name("REAL_TO_INT"));
        assert!(is_type_conversion_name("DINT_TO_TIME"));
        assert!(!is_type_conversion_name("real_to_int"));
        assert!(!is_type_conversion_name("REAL_TO_"));
        assert!(!is_type_conversion_name("_TO_INT"));
        assert!(!is_type_conversion_name("A_TO_B_TO_C"));
        assert!(!is_type_conversion_name("LREAL2INT"));
    }
}
