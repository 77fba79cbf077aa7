use st_syntax::lexer::{lex_with_text, TokenKind};
use st_syntax::{parse, ParseErrorKind};

fn non_trivia(source: &str) -> Vec<(TokenKind, &str)> {
    lex_with_text(source)
        .into_iter()
        .filter(|(token, _)| !token.kind.is_trivia())
        .map(|(token, text)| (token.kind, text))
        .collect()
}

fn single_kind(source: &str) -> TokenKind {
    let tokens = non_trivia(source);
    assert_eq!(tokens.len(), 1, "{source:?} lexed as {tokens:?}");
    tokens[0].0
}

#[test]
fn integer_literals() {
    for source in ["0", "42", "1_000", "2#1010", "2#1111_0000", "8#777", "16#FF", "16#dead_BEEF"] {
        assert_eq!(single_kind(source), TokenKind::IntLiteral, "{source}");
    }
}

#[test]
fn real_literals() {
    for source in ["3.14", "1.0E10", "2e-3", "1.5e+3", ".5", "0.000_1"] {
        assert_eq!(single_kind(source), TokenKind::RealLiteral, "{source}");
    }
}

#[test]
fn time_literals_follow_unit_order() {
    for source in [
        "T#1d",
        "T#1d2h",
        "T#1d2h3m4s5ms",
        "T#2h30m",
        "T#1m30.5s",
        "T#1.5s",
        "t#250ms",
        "T#5s100ms",
    ] {
        assert_eq!(single_kind(source), TokenKind::TimeLiteral, "{source}");
    }
}

#[test]
fn malformed_time_literals_are_single_errors() {
    for source in ["T#1h2d", "T#1d2m", "T#1.5h30m", "T#5", "T#"] {
        assert_eq!(single_kind(source), TokenKind::Error, "{source}");
    }
}

#[test]
fn malformed_time_literal_is_reported() {
    let parsed = parse("x := T#1h2d;");
    let errors = parsed.errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].kind, ParseErrorKind::Lexical);
    assert_eq!(errors[0].message, "malformed time literal");
    assert_eq!(
        (u32::from(errors[0].range.start()), u32::from(errors[0].range.end())),
        (5, 11)
    );
}

#[test]
fn string_literals() {
    assert_eq!(
        non_trivia("'hello' ''"),
        vec![
            (TokenKind::StringLiteral, "'hello'"),
            (TokenKind::StringLiteral, "''")
        ]
    );
}

#[test]
fn unterminated_string_stops_at_line_end() {
    let tokens = non_trivia("'abc\nx");
    assert_eq!(tokens, vec![(TokenKind::Error, "'abc"), (TokenKind::Ident, "x")]);

    let parsed = parse("x := 'abc");
    let lexical: Vec<_> = parsed
        .errors()
        .iter()
        .filter(|error| error.kind == ParseErrorKind::Lexical)
        .map(|error| error.message.as_str())
        .collect();
    assert_eq!(lexical, vec!["unterminated string literal"]);
}

#[test]
fn block_comments_do_not_nest() {
    assert_eq!(
        non_trivia("(* a (* b *) c *)"),
        vec![
            (TokenKind::Ident, "c"),
            (TokenKind::Star, "*"),
            (TokenKind::RParen, ")")
        ]
    );
}

#[test]
fn unterminated_block_comment_is_reported() {
    let parsed = parse("x := 1; (* open");
    assert_eq!(parsed.errors().len(), 1, "{:?}", parsed.errors());
    assert_eq!(parsed.errors()[0].message, "unterminated block comment");
}

#[test]
fn pragmas_are_tokens_not_trivia() {
    let tokens = non_trivia("{attribute 'hide'} x");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Pragma, "{attribute 'hide'}"),
            (TokenKind::Ident, "x")
        ]
    );
    assert!(!TokenKind::Pragma.is_trivia());
}

#[test]
fn unterminated_pragma_is_reported() {
    let parsed = parse("{never closed");
    assert_eq!(parsed.errors().len(), 1, "{:?}", parsed.errors());
    assert_eq!(parsed.errors()[0].message, "unterminated pragma");
}

#[test]
fn keywords_in_any_case() {
    let kinds: Vec<_> = non_trivia("end_if End_If END_IF var_stat Var_Static")
        .into_iter()
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::KwEndIf,
            TokenKind::KwEndIf,
            TokenKind::KwEndIf,
            TokenKind::KwVarStatic,
            TokenKind::KwVarStatic
        ]
    );
}

#[test]
fn identifiers_containing_keywords() {
    assert_eq!(
        non_trivia("IF_x ENDIF _tmp1 iffy"),
        vec![
            (TokenKind::Ident, "IF_x"),
            (TokenKind::Ident, "ENDIF"),
            (TokenKind::Ident, "_tmp1"),
            (TokenKind::Ident, "iffy")
        ]
    );
}
