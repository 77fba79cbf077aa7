//! `st-syntax` - Lexer, parser, and concrete syntax tree for IEC 61131-3 Structured Text.
//!
//! This crate provides the syntactic analysis for ST source code:
//!
//! - **Lexer**: Tokenizes source text into a stream of tokens
//! - **Parser**: Builds a concrete syntax tree (CST) from tokens
//! - **Syntax Tree**: Lossless representation of the source code
//! - **AST**: Typed accessors over the syntax tree
//!
//! # Design Principles
//!
//! This crate follows the design of `rust-analyzer` and uses the `rowan` library
//! for building lossless syntax trees. Key design decisions:
//!
//! - **Lossless**: All source text is preserved, including whitespace and comments
//! - **Error-tolerant**: Parsing continues after errors, producing a partial tree
//! - **Two entry shapes**: A source unit is either a list of declarations
//!   (`PROGRAM`, `FUNCTION_BLOCK`, `FUNCTION`, `TYPE`) or a bare statement block
//!
//! # Example
//!
//! ```
//! use st_syntax::ast::{AstNode, Stmt};
//! use st_syntax::parse;
//!
//! let parse = parse("IF start THEN motor := TRUE; END_IF;");
//! assert!(parse.ok());
//! assert_eq!(
//!     parse.to_sexp(),
//!     "(source_file (block (if_statement (identifier) (block (assignment (identifier) (boolean_literal))))))"
//! );
//!
//! let block = parse.source_file().block().unwrap();
//! let Some(Stmt::IfStatement(stmt)) = block.statements().next() else {
//!     panic!("expected IF");
//! };
//! assert_eq!(stmt.condition().unwrap().text(), "start");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod syntax;
mod token_kinds;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use parser::{parse, Parse, ParseError, ParseErrorKind};
pub use syntax::{StLanguage, SyntaxKind, SyntaxNode, SyntaxToken};
