//! Parser for IEC 61131-3 Structured Text.
//!
//! This module provides a hand-written recursive descent parser that builds
//! a lossless concrete syntax tree (CST) using the `rowan` library.
//!
//! # Architecture
//!
//! The parser uses a three-phase approach:
//!
//! 1. **Lexing**: Tokens are pulled lazily from the `lexer` as the parser
//!    looks ahead
//! 2. **Parsing**: Build a flat stream of events (start node, add token, finish node)
//! 3. **Tree Building**: Convert events into a `rowan` green tree
//!
//! A source unit is parsed in one of two modes, decided by its first
//! significant token: a sequence of declarations (`FUNCTION_BLOCK`,
//! `FUNCTION`, `PROGRAM`, `TYPE`) or a single bare statement block.

#![allow(clippy::module_inception)]

pub mod event;
mod grammar;
mod parser;
mod sink;
mod source;

pub use parser::parse;
pub(crate) use parser::{CompletedMarker, Parser};

use text_size::TextRange;
use thiserror::Error;

use crate::ast::SourceFile;
use crate::syntax::{self, SyntaxNode};

/// Result of parsing source text.
///
/// A tree is always produced, even for invalid input; errors are reported
/// alongside it.
#[derive(Debug, Clone)]
pub struct Parse {
    /// The root syntax node.
    green_node: rowan::GreenNode,
    /// Lexical and syntax errors, ordered by position.
    errors: Vec<ParseError>,
}

impl Parse {
    /// Returns the root syntax node.
    #[must_use]
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green_node.clone())
    }

    /// Returns the typed root of the tree.
    #[must_use]
    pub fn source_file(&self) -> SourceFile {
        SourceFile::from_root(self.syntax())
    }

    /// Returns the underlying green tree.
    #[must_use]
    pub fn green_node(&self) -> &rowan::GreenNode {
        &self.green_node
    }

    /// Returns the parsing errors.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` if parsing produced no errors.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Renders the tree with ranges, for tests and debugging.
    #[must_use]
    pub fn debug_tree(&self) -> String {
        syntax::debug_tree(&self.syntax(), false)
    }

    /// Renders the node structure as an S-expression.
    #[must_use]
    pub fn to_sexp(&self) -> String {
        syntax::to_sexp(&self.syntax())
    }
}

/// The category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Input that matches no token rule.
    Lexical,
    /// A token sequence that matches no production.
    Syntax,
}

/// A parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {}..{}", u32::from(.range.start()), u32::from(.range.end()))]
pub struct ParseError {
    /// Whether the error came from the lexer or the parser.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The byte range where the error occurred.
    pub range: TextRange,
}

impl ParseError {
    pub(crate) fn lexical(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind: ParseErrorKind::Lexical,
            message: message.into(),
            range,
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            range,
        }
    }
}
