//! Token definitions for IEC 61131-3 Structured Text.
//!
//! This module defines all lexical tokens that can appear in ST source code.
//! The token kinds are designed to work with both the `logos` lexer generator
//! and the `rowan` lossless syntax tree library.

use logos::Logos;

/// Block comments do not nest: the first `*)` after the opener closes it.
fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let rest = lex.remainder();
    match rest.find("*)") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

/// All token kinds in IEC 61131-3 Structured Text.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments) - preserved but not semantically significant
/// - Pragmas - bracketed directives, significant to the parser
/// - Punctuation and operators
/// - Keywords (reserved words, matched case-insensitively)
/// - Literals (numbers, durations, strings)
/// - Identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u16)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines)
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Single-line comment: // ...
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// Block comment: (* ... *)
    #[token("(*", lex_block_comment)]
    BlockComment,

    // =========================================================================
    // PRAGMAS
    // =========================================================================
    /// Pragma: { ... }
    #[regex(r"\{[^}]*\}", priority = 2)]
    Pragma,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `..`
    #[token("..")]
    DotDot,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `]`
    #[token("]")]
    RBracket,

    // =========================================================================
    // OPERATORS
    // =========================================================================
    /// `:=`
    #[token(":=")]
    Assign,

    /// `=>`
    #[token("=>")]
    Arrow,

    /// `=`
    #[token("=")]
    Eq,

    /// `<>`
    #[token("<>")]
    Neq,

    /// `<`
    #[token("<")]
    Lt,

    /// `<=`
    #[token("<=")]
    LtEq,

    /// `>`
    #[token(">")]
    Gt,

    /// `>=`
    #[token(">=")]
    GtEq,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `*`
    #[token("*")]
    Star,

    /// `/`
    #[token("/")]
    Slash,

    /// `**`
    #[token("**")]
    Power,

    // =========================================================================
    // KEYWORDS - Program Organization Units
    // =========================================================================
    /// `PROGRAM`
    #[token("PROGRAM", ignore(case))]
    KwProgram,

    /// `END_PROGRAM`
    #[token("END_PROGRAM", ignore(case))]
    KwEndProgram,

    /// `FUNCTION`
    #[token("FUNCTION", ignore(case))]
    KwFunction,

    /// `END_FUNCTION`
    #[token("END_FUNCTION", ignore(case))]
    KwEndFunction,

    /// `FUNCTION_BLOCK`
    #[token("FUNCTION_BLOCK", ignore(case))]
    KwFunctionBlock,

    /// `END_FUNCTION_BLOCK`
    #[token("END_FUNCTION_BLOCK", ignore(case))]
    KwEndFunctionBlock,

    // =========================================================================
    // KEYWORDS - Variable Sections
    // =========================================================================
    /// `VAR`
    #[token("VAR", ignore(case))]
    KwVar,

    /// `VAR_INPUT`
    #[token("VAR_INPUT", ignore(case))]
    KwVarInput,

    /// `VAR_OUTPUT`
    #[token("VAR_OUTPUT", ignore(case))]
    KwVarOutput,

    /// `VAR_IN_OUT`
    #[token("VAR_IN_OUT", ignore(case))]
    KwVarInOut,

    /// `VAR_TEMP`
    #[token("VAR_TEMP", ignore(case))]
    KwVarTemp,

    /// `VAR_STATIC` / `VAR_STAT`
    #[token("VAR_STATIC", ignore(case))]
    #[token("VAR_STAT", ignore(case))]
    KwVarStatic,

    /// `VAR_GLOBAL`
    #[token("VAR_GLOBAL", ignore(case))]
    KwVarGlobal,

    /// `VAR_EXTERNAL`
    #[token("VAR_EXTERNAL", ignore(case))]
    KwVarExternal,

    /// `END_VAR`
    #[token("END_VAR", ignore(case))]
    KwEndVar,

    /// `CONSTANT`
    #[token("CONSTANT", ignore(case))]
    KwConstant,

    // =========================================================================
    // KEYWORDS - Type Definitions
    // =========================================================================
    /// `TYPE`
    #[token("TYPE", ignore(case))]
    KwType,

    /// `END_TYPE`
    #[token("END_TYPE", ignore(case))]
    KwEndType,

    /// `STRUCT`
    #[token("STRUCT", ignore(case))]
    KwStruct,

    /// `END_STRUCT`
    #[token("END_STRUCT", ignore(case))]
    KwEndStruct,

    /// `ARRAY`
    #[token("ARRAY", ignore(case))]
    KwArray,

    /// `OF`
    #[token("OF", ignore(case))]
    KwOf,

    // =========================================================================
    // KEYWORDS - Control Flow
    // =========================================================================
    /// `IF`
    #[token("IF", ignore(case))]
    KwIf,

    /// `THEN`
    #[token("THEN", ignore(case))]
    KwThen,

    /// `ELSIF`
    #[token("ELSIF", ignore(case))]
    KwElsif,

    /// `ELSE`
    #[token("ELSE", ignore(case))]
    KwElse,

    /// `END_IF`
    #[token("END_IF", ignore(case))]
    KwEndIf,

    /// `CASE`
    #[token("CASE", ignore(case))]
    KwCase,

    /// `END_CASE`
    #[token("END_CASE", ignore(case))]
    KwEndCase,

    /// `RETURN`
    #[token("RETURN", ignore(case))]
    KwReturn,

    // =========================================================================
    // KEYWORDS - Logical Operators
    // =========================================================================
    /// `AND`
    #[token("AND", ignore(case))]
    KwAnd,

    /// `OR`
    #[token("OR", ignore(case))]
    KwOr,

    /// `XOR`
    #[token("XOR", ignore(case))]
    KwXor,

    /// `NOT`
    #[token("NOT", ignore(case))]
    KwNot,

    /// `MOD`
    #[token("MOD", ignore(case))]
    KwMod,

    // =========================================================================
    // KEYWORDS - Boolean Literals
    // =========================================================================
    /// `TRUE`
    #[token("TRUE", ignore(case))]
    KwTrue,

    /// `FALSE`
    #[token("FALSE", ignore(case))]
    KwFalse,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: 123, 1_000, 16#FF, 2#1010, 8#77
    #[regex(r"[0-9](?:_?[0-9])*_?")]
    #[regex(r"2#(?:_?[01])+")]
    #[regex(r"8#(?:_?[0-7])+")]
    #[regex(r"16#(?:_?[0-9A-Fa-f])+")]
    IntLiteral,

    /// Real literal: 3.14, 1., .5, 1.0E10, 2e-3, 1.5L
    #[regex(
        r"(?:[0-9](?:_?[0-9])*_?\.(?:[0-9](?:_?[0-9])*_?)?(?:[eE][+-]?[0-9](?:_?[0-9])*_?)?|\.[0-9](?:_?[0-9])*_?(?:[eE][+-]?[0-9](?:_?[0-9])*_?)?|[0-9](?:_?[0-9])*_?[eE][+-]?[0-9](?:_?[0-9])*_?)[LlJj]?"
    )]
    RealLiteral,

    /// Time literal: T#1d2h3m4.5s, t#250ms, T#1H30M
    ///
    /// Units appear in descending order without gaps and in either case;
    /// only the last unit may carry a fraction. One pattern per starting
    /// unit.
    #[regex(
        r"[Tt]#(?:[0-9]+(?:\.[0-9]+)?[dD]|[0-9]+[dD][0-9]+(?:\.[0-9]+)?[hH]|[0-9]+[dD][0-9]+[hH][0-9]+(?:\.[0-9]+)?[mM]|[0-9]+[dD][0-9]+[hH][0-9]+[mM][0-9]+(?:\.[0-9]+)?[sS]|[0-9]+[dD][0-9]+[hH][0-9]+[mM][0-9]+[sS][0-9]+(?:\.[0-9]+)?[mM][sS])",
        priority = 10
    )]
    #[regex(
        r"[Tt]#(?:[0-9]+(?:\.[0-9]+)?[hH]|[0-9]+[hH][0-9]+(?:\.[0-9]+)?[mM]|[0-9]+[hH][0-9]+[mM][0-9]+(?:\.[0-9]+)?[sS]|[0-9]+[hH][0-9]+[mM][0-9]+[sS][0-9]+(?:\.[0-9]+)?[mM][sS])",
        priority = 10
    )]
    #[regex(
        r"[Tt]#(?:[0-9]+(?:\.[0-9]+)?[mM]|[0-9]+[mM][0-9]+(?:\.[0-9]+)?[sS]|[0-9]+[mM][0-9]+[sS][0-9]+(?:\.[0-9]+)?[mM][sS])",
        priority = 10
    )]
    #[regex(
        r"[Tt]#(?:[0-9]+(?:\.[0-9]+)?[sS]|[0-9]+[sS][0-9]+(?:\.[0-9]+)?[mM][sS])",
        priority = 10
    )]
    #[regex(
        r"[Tt]#[0-9]+(?:\.[0-9]+)?[mM][sS]",
        priority = 10
    )]
    TimeLiteral,

    /// Single-quoted string: 'hello'
    #[regex(r"'[^']*'", priority = 2)]
    StringLiteral,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier: starts with letter or underscore, contains letters, digits, underscores
    #[regex(r"[_a-zA-Z][_a-zA-Z0-9]*")]
    Ident,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized or unterminated input
    #[regex(r"[Tt]#[0-9A-Za-z_.]*", priority = 1)]
    #[regex(r"'[^'\r\n]*", priority = 1)]
    #[regex(r"\{[^}]*", priority = 1)]
    #[default]
    Error,

    /// End of file marker (not produced by lexer, added by parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or comment).
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Returns `true` if this token is a comment.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// Returns `true` if this token is a keyword.
    pub fn is_keyword(self) -> bool {
        self.canonical_text().is_some()
    }

    /// Returns the canonical lowercase spelling of a keyword.
    ///
    /// Keywords match in any casing; downstream consumers compare against
    /// this form instead of the source text.
    pub fn canonical_text(self) -> Option<&'static str> {
        Some(match self {
            Self::KwProgram => "program",
            Self::KwEndProgram => "end_program",
            Self::KwFunction => "function",
            Self::KwEndFunction => "end_function",
            Self::KwFunctionBlock => "function_block",
            Self::KwEndFunctionBlock => "end_function_block",
            Self::KwVar => "var",
            Self::KwVarInput => "var_input",
            Self::KwVarOutput => "var_output",
            Self::KwVarInOut => "var_in_out",
            Self::KwVarTemp => "var_temp",
            Self::KwVarStatic => "var_static",
            Self::KwVarGlobal => "var_global",
            Self::KwVarExternal => "var_external",
            Self::KwEndVar => "end_var",
            Self::KwConstant => "constant",
            Self::KwType => "type",
            Self::KwEndType => "end_type",
            Self::KwStruct => "struct",
            Self::KwEndStruct => "end_struct",
            Self::KwArray => "array",
            Self::KwOf => "of",
            Self::KwIf => "if",
            Self::KwThen => "then",
            Self::KwElsif => "elsif",
            Self::KwElse => "else",
            Self::KwEndIf => "end_if",
            Self::KwCase => "case",
            Self::KwEndCase => "end_case",
            Self::KwReturn => "return",
            Self::KwAnd => "and",
            Self::KwOr => "or",
            Self::KwXor => "xor",
            Self::KwNot => "not",
            Self::KwMod => "mod",
            Self::KwTrue => "true",
            Self::KwFalse => "false",
            _ => return None,
        })
    }

    /// Returns `true` if this token opens a top-level declaration.
    pub fn is_declaration_start(self) -> bool {
        matches!(
            self,
            Self::KwFunctionBlock | Self::KwFunction | Self::KwProgram | Self::KwType
        )
    }

    /// Returns `true` if this token closes a top-level declaration.
    pub fn is_declaration_end(self) -> bool {
        matches!(
            self,
            Self::KwEndFunctionBlock | Self::KwEndFunction | Self::KwEndProgram | Self::KwEndType
        )
    }

    /// Returns `true` if this token is a variable section keyword.
    pub fn is_var_keyword(self) -> bool {
        matches!(
            self,
            Self::KwVar
                | Self::KwVarInput
                | Self::KwVarOutput
                | Self::KwVarInOut
                | Self::KwVarTemp
                | Self::KwVarStatic
                | Self::KwVarGlobal
                | Self::KwVarExternal
        )
    }

    /// Returns `true` if this token can start an expression.
    pub fn can_start_expr(self) -> bool {
        matches!(
            self,
            Self::Ident
                | Self::IntLiteral
                | Self::RealLiteral
                | Self::TimeLiteral
                | Self::StringLiteral
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNot
                | Self::LParen
                | Self::Minus
        )
    }

    /// Returns `true` if this token can start a statement.
    pub fn can_start_statement(self) -> bool {
        matches!(
            self,
            Self::Ident | Self::KwIf | Self::KwCase | Self::KwReturn
        )
    }

    /// Returns `true` if this token is a comparison operator.
    pub fn is_comparison_op(self) -> bool {
        matches!(self, Self::Lt | Self::LtEq | Self::Gt | Self::GtEq)
    }

    /// Returns `true` if this token is an equality operator.
    pub fn is_equality_op(self) -> bool {
        matches!(self, Self::Eq | Self::Neq)
    }

    /// Returns `true` if this token is a boolean operator.
    pub fn is_boolean_op(self) -> bool {
        matches!(self, Self::KwAnd | Self::KwOr | Self::KwXor)
    }

    /// Returns the precedence level of an infix operator and whether it
    /// associates to the right.
    ///
    /// Levels (low to high): OR 0, XOR 1, AND 2, `= <>` 10,
    /// `< <= >= >` 11, `+ -` 20, `* / MOD` 21, `**` 22.
    pub fn infix_precedence(self) -> Option<(u8, bool)> {
        Some(match self {
            Self::KwOr => (0, false),
            Self::KwXor => (1, false),
            Self::KwAnd => (2, false),
            Self::Eq | Self::Neq => (10, false),
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => (11, false),
            Self::Plus | Self::Minus => (20, false),
            Self::Star | Self::Slash | Self::KwMod => (21, false),
            Self::Power => (22, true),
            _ => return None,
        })
    }

    /// Returns the precedence level for prefix operators.
    pub fn prefix_precedence(self) -> Option<u8> {
        Some(match self {
            Self::KwNot | Self::Minus => 30,
            _ => return None,
        })
    }
}
