//! Syntax tree types for IEC 61131-3 Structured Text.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

use std::fmt::Write;

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    ($($token:ident),* $(,)?) => {
        /// All syntax node and token kinds in IEC 61131-3 Structured Text.
        ///
        /// This enum includes both token kinds (from the lexer) and composite
        /// node kinds (produced by the parser).
        // Variants mirror lexer/token names; documenting each would be noisy.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            // =========================================================================
            // TOKEN KINDS (mirrors TokenKind)
            // =========================================================================
            $($token,)*

            // COMPOSITE NODE KINDS (produced by parser)
            // =========================================================================
            /// Root node of a source file
            SourceFile,

            // Declarations
            /// `FUNCTION_BLOCK name ... END_FUNCTION_BLOCK`
            FunctionBlockDeclaration,

            /// `FUNCTION name : type ... END_FUNCTION`
            FunctionDeclaration,

            /// `PROGRAM name ... END_PROGRAM`
            ProgramDeclaration,

            /// `TYPE name : STRUCT ... END_STRUCT END_TYPE`
            TypeDeclaration,

            /// `STRUCT ... END_STRUCT`
            StructDefinition,

            /// A field inside a struct definition: `name : type;`
            StructField,

            /// Variable section: `VAR ... END_VAR`, `VAR_INPUT ... END_VAR`, etc.
            VarSection,

            /// Variable declaration: `name : type := initializer;`
            VarDecl,

            /// An array type: `ARRAY[...] OF type`
            ArrayType,

            /// A single array dimension: `0..10`
            ArrayRange,

            /// A pragma in a syntactic position: `{ ... }`
            PragmaItem,

            // Statements
            /// Ordered run of statements
            Block,

            /// Bare `;`
            Noop,

            /// Assignment statement: `x := expr`
            Assignment,

            /// Function block invocation: `fb(a := 1)`
            FbInvocation,

            /// If statement: `IF ... THEN ... END_IF`
            IfStatement,

            /// Elsif branch
            ElsifClause,

            /// Else branch
            ElseClause,

            /// Case statement: `CASE expr OF ... END_CASE`
            CaseStatement,

            /// Case branch: `1, 2..5: statements`
            CaseItem,

            /// Case label: single value or range
            CaseLabel,

            /// Return statement: `RETURN` or `RETURN expr`
            ReturnStatement,

            // Expressions
            /// A single name
            Identifier,

            /// Dotted path: `fb.output`
            QualifiedIdentifier,

            /// Unary expression: `-x`, `NOT x`
            UnaryExpression,

            /// Arithmetic expression: `a + b`, `a MOD b`, `a ** b`
            BinaryOperator,

            /// Boolean expression: `a AND b`
            BooleanOperator,

            /// Comparison expression: `a < b`
            ComparisonOperator,

            /// Equality expression: `a = b`, `a <> b`
            EqualityOperator,

            /// Parenthesized expression: `(expr)`
            ParenthesizedExpression,

            /// Function call: `func(args)`
            FunctionCall,

            /// Type conversion call: `REAL_TO_INT(x)`
            TypeConversion,

            /// Parenthesized argument list of a call or invocation
            ArgumentList,

            /// Single argument: positional, `name := value` or `[NOT] name => target`
            ParamAssignment,

            IntegerLiteral,
            FloatLiteral,
            TimeLiteralExpr,
            BooleanLiteral,
            StringLiteralExpr,
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Returns `true` for line and block comments.
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns `true` if this node kind is an expression.
    #[must_use]
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::QualifiedIdentifier
                | Self::UnaryExpression
                | Self::BinaryOperator
                | Self::BooleanOperator
                | Self::ComparisonOperator
                | Self::EqualityOperator
                | Self::ParenthesizedExpression
                | Self::FunctionCall
                | Self::TypeConversion
                | Self::IntegerLiteral
                | Self::FloatLiteral
                | Self::TimeLiteralExpr
                | Self::BooleanLiteral
                | Self::StringLiteralExpr
        )
    }

    /// Returns the tree-sitter style name of a node kind.
    ///
    /// Token kinds have no S-expression name and return `None`.
    #[must_use]
    pub fn sexp_name(self) -> Option<&'static str> {
        Some(match self {
            Self::Error => "ERROR",
            Self::SourceFile => "source_file",
            Self::FunctionBlockDeclaration => "function_block_declaration",
            Self::FunctionDeclaration => "function_declaration",
            Self::ProgramDeclaration => "program_declaration",
            Self::TypeDeclaration => "type_declaration",
            Self::StructDefinition => "struct_definition",
            Self::StructField => "struct_field",
            Self::VarSection => "var_section",
            Self::VarDecl => "var_decl",
            Self::ArrayType => "array_type",
            Self::ArrayRange => "array_range",
            Self::PragmaItem => "pragma",
            Self::Block => "block",
            Self::Noop => "noop",
            Self::Assignment => "assignment",
            Self::FbInvocation => "fb_invocation",
            Self::IfStatement => "if_statement",
            Self::ElsifClause => "elsif_clause",
            Self::ElseClause => "else_clause",
            Self::CaseStatement => "case_statement",
            Self::CaseItem => "case_item",
            Self::CaseLabel => "case_label",
            Self::ReturnStatement => "return",
            Self::Identifier => "identifier",
            Self::QualifiedIdentifier => "qualified_identifier",
            Self::UnaryExpression => "unary_expression",
            Self::BinaryOperator => "binary_operator",
            Self::BooleanOperator => "boolean_operator",
            Self::ComparisonOperator => "comparison_operator",
            Self::EqualityOperator => "equality_operator",
            Self::ParenthesizedExpression => "parenthesized_expression",
            Self::FunctionCall => "function_call",
            Self::TypeConversion => "type_conversion",
            Self::ArgumentList => "argument_list",
            Self::ParamAssignment => "param_assignment",
            Self::IntegerLiteral => "integer_literal",
            Self::FloatLiteral => "float_literal",
            Self::TimeLiteralExpr => "time_literal",
            Self::BooleanLiteral => "boolean_literal",
            Self::StringLiteralExpr => "string_literal",
            _ => return None,
        })
    }
}

macro_rules! map_token_kinds {
    ($($name:ident),* $(,)?) => {
        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$name => SyntaxKind::$name,)*
                }
            }
        }
    };
}

for_each_token_kind!(map_token_kinds);

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for Structured Text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StLanguage {}

macro_rules! define_syntax_kinds {
    ($($token:ident),* $(,)?) => {
        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            SyntaxKind::SourceFile,
            SyntaxKind::FunctionBlockDeclaration,
            SyntaxKind::FunctionDeclaration,
            SyntaxKind::ProgramDeclaration,
            SyntaxKind::TypeDeclaration,
            SyntaxKind::StructDefinition,
            SyntaxKind::StructField,
            SyntaxKind::VarSection,
            SyntaxKind::VarDecl,
            SyntaxKind::ArrayType,
            SyntaxKind::ArrayRange,
            SyntaxKind::PragmaItem,
            SyntaxKind::Block,
            SyntaxKind::Noop,
            SyntaxKind::Assignment,
            SyntaxKind::FbInvocation,
            SyntaxKind::IfStatement,
            SyntaxKind::ElsifClause,
            SyntaxKind::ElseClause,
            SyntaxKind::CaseStatement,
            SyntaxKind::CaseItem,
            SyntaxKind::CaseLabel,
            SyntaxKind::ReturnStatement,
            SyntaxKind::Identifier,
            SyntaxKind::QualifiedIdentifier,
            SyntaxKind::UnaryExpression,
            SyntaxKind::BinaryOperator,
            SyntaxKind::BooleanOperator,
            SyntaxKind::ComparisonOperator,
            SyntaxKind::EqualityOperator,
            SyntaxKind::ParenthesizedExpression,
            SyntaxKind::FunctionCall,
            SyntaxKind::TypeConversion,
            SyntaxKind::ArgumentList,
            SyntaxKind::ParamAssignment,
            SyntaxKind::IntegerLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::TimeLiteralExpr,
            SyntaxKind::BooleanLiteral,
            SyntaxKind::StringLiteralExpr,
        ];
    };
}

for_each_token_kind!(define_syntax_kinds);

impl rowan::Language for StLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the ST syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<StLanguage>;

/// A syntax token in the ST syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<StLanguage>;

/// A syntax element (either node or token) in the ST syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<StLanguage>;

/// A builder for syntax trees.
pub type SyntaxTreeBuilder = rowan::GreenNodeBuilder<'static>;

/// Renders a node as an indented `Kind@start..end` listing.
///
/// Non-trivia tokens are printed with their text; whitespace and comments
/// are printed only when `include_trivia` is set.
#[must_use]
pub fn debug_tree(node: &SyntaxNode, include_trivia: bool) -> String {
    let mut out = String::new();
    write_debug_tree(&mut out, node, 0, include_trivia);
    out
}

fn write_debug_tree(out: &mut String, node: &SyntaxNode, depth: usize, include_trivia: bool) {
    let range = node.text_range();
    let _ = writeln!(
        out,
        "{:indent$}{:?}@{}..{}",
        "",
        node.kind(),
        u32::from(range.start()),
        u32::from(range.end()),
        indent = depth * 2
    );
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(child) => {
                write_debug_tree(out, &child, depth + 1, include_trivia);
            }
            rowan::NodeOrToken::Token(token) => {
                if token.kind().is_trivia() && !include_trivia {
                    continue;
                }
                let range = token.text_range();
                let _ = writeln!(
                    out,
                    "{:indent$}{:?}@{}..{} {:?}",
                    "",
                    token.kind(),
                    u32::from(range.start()),
                    u32::from(range.end()),
                    token.text(),
                    indent = (depth + 1) * 2
                );
            }
        }
    }
}

/// Renders the node structure as a tree-sitter style S-expression.
///
/// Only nodes appear; tokens are omitted, so `a := 1;` renders as
/// `(source_file (block (assignment (identifier) (integer_literal))))`.
#[must_use]
pub fn to_sexp(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_sexp(&mut out, node);
    out
}

fn write_sexp(out: &mut String, node: &SyntaxNode) {
    out.push('(');
    out.push_str(node.kind().sexp_name().unwrap_or("unknown"));
    for child in node.children() {
        out.push(' ');
        write_sexp(out, &child);
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_to_syntax_kind() {
        assert_eq!(
            SyntaxKind::from(TokenKind::KwFunctionBlock),
            SyntaxKind::KwFunctionBlock
        );
        assert_eq!(SyntaxKind::from(TokenKind::Ident), SyntaxKind::Ident);
        assert_eq!(SyntaxKind::from(TokenKind::Assign), SyntaxKind::Assign);
        assert_eq!(SyntaxKind::from(TokenKind::Eof), SyntaxKind::Eof);
    }

    #[test]
    fn test_raw_kind_round_trip() {
        use rowan::Language;

        for kind in SYNTAX_KINDS {
            assert_eq!(StLanguage::kind_from_raw(StLanguage::kind_to_raw(*kind)), *kind);
        }
        assert_eq!(
            SYNTAX_KINDS.last().copied(),
            Some(SyntaxKind::StringLiteralExpr)
        );
    }

    #[test]
    fn test_is_trivia() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(SyntaxKind::LineComment.is_trivia());
        assert!(SyntaxKind::BlockComment.is_trivia());
        assert!(!SyntaxKind::Pragma.is_trivia());
        assert!(!SyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_is_token_vs_node() {
        assert!(SyntaxKind::Ident.is_token());
        assert!(SyntaxKind::KwIf.is_token());
        assert!(!SyntaxKind::IfStatement.is_token());
        assert!(!SyntaxKind::FunctionBlockDeclaration.is_token());

        assert!(!SyntaxKind::Ident.is_node());
        assert!(SyntaxKind::IfStatement.is_node());
    }

    #[test]
    fn test_sexp_names() {
        assert_eq!(SyntaxKind::Block.sexp_name(), Some("block"));
        assert_eq!(SyntaxKind::PragmaItem.sexp_name(), Some("pragma"));
        assert_eq!(SyntaxKind::TimeLiteralExpr.sexp_name(), Some("time_literal"));
        assert_eq!(SyntaxKind::Error.sexp_name(), Some("ERROR"));
        assert_eq!(SyntaxKind::Ident.sexp_name(), None);
    }
}
