//! Sink for converting parser events into a syntax tree.
//!
//! The sink takes the flat event stream and builds a proper `rowan` green tree.
//! Trivia is placed so that every node starts at its first token and ends at
//! its last one: leading trivia goes to the parent before the node opens, and
//! trivia at the end of input goes to the root.

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax::SyntaxKind;

/// Builds a syntax tree from parser events.
pub struct Sink<'t, 'src> {
    tokens: &'t [Token],
    source: &'src str,
    events: Vec<Event>,
    cursor: usize,
    depth: usize,
    builder: rowan::GreenNodeBuilder<'static>,
}

impl<'t, 'src> Sink<'t, 'src> {
    /// Creates a new sink.
    pub fn new(tokens: &'t [Token], source: &'src str, events: Vec<Event>) -> Self {
        Self {
            tokens,
            source,
            events,
            cursor: 0,
            depth: 0,
            builder: rowan::GreenNodeBuilder::new(),
        }
    }

    /// Consumes the sink and returns the green tree.
    pub fn finish(mut self) -> rowan::GreenNode {
        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    // Handle forward parent chain
                    let mut kinds = vec![kind];
                    let mut idx = i;
                    let mut fp = forward_parent;

                    while let Some(fp_idx) = fp {
                        idx += fp_idx as usize;
                        if let Event::Start {
                            kind,
                            forward_parent,
                        } = std::mem::replace(&mut self.events[idx], Event::Placeholder)
                        {
                            kinds.push(kind);
                            fp = forward_parent;
                        } else {
                            break;
                        }
                    }

                    // An empty node must not pull trivia into its parent,
                    // where it would trail the parent's last token.
                    if self.depth > 0 && !(kinds.len() == 1 && self.is_empty_node(i)) {
                        self.eat_trivia();
                    }
                    for kind in kinds.into_iter().rev() {
                        self.builder.start_node(kind.into());
                        self.depth += 1;
                    }
                }
                Event::Token { kind } => {
                    self.eat_trivia();
                    self.token(kind);
                }
                Event::Finish => {
                    if self.depth == 1 {
                        self.eat_remaining();
                    }
                    self.builder.finish_node();
                    self.depth = self.depth.saturating_sub(1);
                }
                Event::Placeholder => {}
            }
        }

        self.builder.finish()
    }

    /// Returns `true` if the node started at `start` finishes before any
    /// token is added.
    fn is_empty_node(&self, start: usize) -> bool {
        let mut depth = 0usize;
        for event in &self.events[start + 1..] {
            match event {
                Event::Start { .. } => depth += 1,
                Event::Finish if depth == 0 => return true,
                Event::Finish => depth -= 1,
                Event::Token { .. } => return false,
                Event::Placeholder => {}
            }
        }
        true
    }

    /// Adds trivia (whitespace, comments) to the current node.
    fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() {
                break;
            }
            self.token(SyntaxKind::from(token.kind));
        }
    }

    /// Adds every token not yet placed; used when closing the root.
    fn eat_remaining(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            self.token(SyntaxKind::from(token.kind));
        }
    }

    /// Adds a token to the tree.
    fn token(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.get(self.cursor) {
            self.builder.token(kind.into(), token.text(self.source));
            self.cursor += 1;
        }
    }
}
