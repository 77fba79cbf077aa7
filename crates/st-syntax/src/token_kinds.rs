//! Shared list of token kinds.
//!
//! `TokenKind` and the token half of `SyntaxKind` must agree on order, so the
//! list lives in one place and is expanded by callback macros.

macro_rules! for_each_token_kind {
    ($callback:ident) => {
        $callback! {
            Whitespace,
            LineComment,
            BlockComment,
            Pragma,
            Semicolon,
            Colon,
            Comma,
            Dot,
            DotDot,
            LParen,
            RParen,
            LBracket,
            RBracket,
            Assign,
            Arrow,
            Eq,
            Neq,
            Lt,
            LtEq,
            Gt,
            GtEq,
            Plus,
            Minus,
            Star,
            Slash,
            Power,
            KwProgram,
            KwEndProgram,
            KwFunction,
            KwEndFunction,
            KwFunctionBlock,
            KwEndFunctionBlock,
            KwVar,
            KwVarInput,
            KwVarOutput,
            KwVarInOut,
            KwVarTemp,
            KwVarStatic,
            KwVarGlobal,
            KwVarExternal,
            KwEndVar,
            KwConstant,
            KwType,
            KwEndType,
            KwStruct,
            KwEndStruct,
            KwArray,
            KwOf,
            KwIf,
            KwThen,
            KwElsif,
            KwElse,
            KwEndIf,
            KwCase,
            KwEndCase,
            KwReturn,
            KwAnd,
            KwOr,
            KwXor,
            KwNot,
            KwMod,
            KwTrue,
            KwFalse,
            IntLiteral,
            RealLiteral,
            TimeLiteral,
            StringLiteral,
            Ident,
            Error,
            Eof,
        }
    };
}

pub(crate) use for_each_token_kind;
