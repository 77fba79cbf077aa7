//! Shared helpers for parser integration tests.
#![allow(dead_code, unused_imports)]

use rowan::NodeOrToken;

pub use st_syntax::parser::parse;
pub use st_syntax::syntax::{SyntaxKind, SyntaxNode};
pub use st_syntax::{Parse, ParseErrorKind};

/// Parses `source`, asserting that it is error free and that every node
/// span is tight around its tokens.
pub fn parse_ok(source: &str) -> Parse {
    let parsed = parse(source);
    assert!(
        parsed.ok(),
        "unexpected errors for {source:?}: {:?}",
        parsed.errors()
    );
    assert_lossless(source, &parsed);
    assert_spans(&parsed.syntax());
    parsed
}

/// S-expression of an error-free parse.
pub fn sexp(source: &str) -> String {
    parse_ok(source).to_sexp()
}

/// S-expression of a single statement parsed in block mode, without the
/// `(source_file (block ...))` wrapper.
pub fn statement_sexp(source: &str) -> String {
    let full = sexp(source);
    full.strip_prefix("(source_file (block ")
        .and_then(|rest| rest.strip_suffix("))"))
        .unwrap_or_else(|| panic!("not a single block: {full}"))
        .to_string()
}

/// Error messages in report order.
pub fn error_messages(source: &str) -> Vec<String> {
    let parsed = parse(source);
    assert_lossless(source, &parsed);
    assert_spans(&parsed.syntax());
    parsed
        .errors()
        .iter()
        .map(|error| error.message.clone())
        .collect()
}

/// The tree reproduces the input byte for byte.
pub fn assert_lossless(source: &str, parsed: &Parse) {
    assert_eq!(parsed.syntax().to_string(), source);
}

/// Every node below the root starts at its first non-trivia token and ends
/// at its last one; nodes without tokens are empty.
pub fn assert_spans(root: &SyntaxNode) {
    for node in root.descendants().skip(1) {
        let tokens: Vec<_> = node
            .descendants_with_tokens()
            .filter_map(NodeOrToken::into_token)
            .filter(|token| !token.kind().is_trivia())
            .collect();
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => {
                assert_eq!(
                    node.text_range().start(),
                    first.text_range().start(),
                    "{:?} starts before its first token",
                    node.kind()
                );
                assert_eq!(
                    node.text_range().end(),
                    last.text_range().end(),
                    "{:?} ends after its last token",
                    node.kind()
                );
            }
            _ => assert!(
                node.text_range().is_empty(),
                "{:?} has only trivia",
                node.kind()
            ),
        }
    }
}
