//! Output rendering for trees, tokens and errors.

use rowan::NodeOrToken;
use serde::Serialize;
use st_syntax::lexer::lex_with_text;
use st_syntax::syntax::{self, SyntaxNode};
use st_syntax::{Parse, ParseError, ParseErrorKind};

use crate::cli::OutputFormat;
use crate::input::Input;

/// Renders the tree of `parse` in `format`.
pub fn render_tree(
    input: &Input,
    parse: &Parse,
    format: OutputFormat,
    trivia: bool,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Tree => syntax::debug_tree(&parse.syntax(), trivia),
        OutputFormat::Sexp => format!("{}\n", parse.to_sexp()),
        OutputFormat::Json => {
            let document = JsonDocument {
                path: &input.name,
                tree: json_node(&parse.syntax(), trivia),
                errors: parse
                    .errors()
                    .iter()
                    .map(|error| JsonError::new(input, error))
                    .collect(),
            };
            format!("{}\n", serde_json::to_string_pretty(&document)?)
        }
    })
}

/// Formats one error as `path:line:col: message`.
#[must_use]
pub fn error_line(input: &Input, error: &ParseError) -> String {
    let (line, column) = input.line_col(error.range.start());
    format!("{}:{line}:{column}: {}", input.name, error.message)
}

/// Formats up to `max_errors` errors, plus a note for the rest.
#[must_use]
pub fn error_lines(input: &Input, errors: &[ParseError], max_errors: usize) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .iter()
        .take(max_errors)
        .map(|error| error_line(input, error))
        .collect();
    if errors.len() > max_errors {
        lines.push(format!(
            "{}: {} more error(s) not shown",
            input.name,
            errors.len() - max_errors
        ));
    }
    lines
}

/// Renders every token of `text`, trivia included, one per line.
#[must_use]
pub fn render_tokens(text: &str) -> String {
    let mut out = String::new();
    for (token, slice) in lex_with_text(text) {
        out.push_str(&format!(
            "{:?}@{}..{} {:?}\n",
            token.kind,
            u32::from(token.range.start()),
            u32::from(token.range.end()),
            slice
        ));
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    path: &'a str,
    tree: JsonNode,
    errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
struct JsonNode {
    kind: String,
    start: u32,
    end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode>,
}

#[derive(Debug, Serialize)]
struct JsonError {
    kind: &'static str,
    message: String,
    start: u32,
    end: u32,
    line: usize,
    column: usize,
}

impl JsonError {
    fn new(input: &Input, error: &ParseError) -> Self {
        let (line, column) = input.line_col(error.range.start());
        Self {
            kind: match error.kind {
                ParseErrorKind::Lexical => "lexical",
                ParseErrorKind::Syntax => "syntax",
            },
            message: error.message.clone(),
            start: error.range.start().into(),
            end: error.range.end().into(),
            line,
            column,
        }
    }
}

fn json_node(node: &SyntaxNode, trivia: bool) -> JsonNode {
    let range = node.text_range();
    let children = node
        .children_with_tokens()
        .filter_map(|child| match child {
            NodeOrToken::Node(child) => Some(json_node(&child, trivia)),
            NodeOrToken::Token(token) if trivia || !token.kind().is_trivia() => {
                let range = token.text_range();
                Some(JsonNode {
                    kind: format!("{:?}", token.kind()),
                    start: range.start().into(),
                    end: range.end().into(),
                    text: Some(token.text().to_string()),
                    children: Vec::new(),
                })
            }
            NodeOrToken::Token(_) => None,
        })
        .collect();
    JsonNode {
        kind: format!("{:?}", node.kind()),
        start: range.start().into(),
        end: range.end().into(),
        text: None,
        children,
    }
}
