//! Parser events.
//!
//! The parser does not build the tree directly. It records a flat stream of
//! events which the sink later replays into a `rowan` green tree, placing
//! trivia as it goes.

use crate::syntax::SyntaxKind;

/// An event produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a new node.
    Start {
        /// The kind of node being started.
        kind: SyntaxKind,
        /// Offset to a node that must wrap this one (left-recursive forms
        /// such as binary operators).
        forward_parent: Option<u32>,
    },
    /// Attach the next non-trivia token to the current node.
    Token {
        /// The kind recorded for the token.
        kind: SyntaxKind,
    },
    /// Finish the current node.
    Finish,
    /// Reserved slot for a marker that is not completed yet, or was abandoned.
    Placeholder,
}

impl Event {
    /// Creates a start event with no forward parent.
    #[must_use]
    pub fn start(kind: SyntaxKind) -> Self {
        Self::Start {
            kind,
            forward_parent: None,
        }
    }

    /// Creates a token event.
    #[must_use]
    pub fn token(kind: SyntaxKind) -> Self {
        Self::Token { kind }
    }
}
