mod common;
use common::*;

#[test]
fn missing_end_program() {
    let source = "PROGRAM Test\n  x := 1;\n";
    let parsed = parse(source);
    assert_eq!(error_messages(source), vec!["expected END_PROGRAM"]);
    let error = &parsed.errors()[0];
    assert!(error.range.is_empty());
    assert_eq!(usize::from(error.range.start()), source.len());
    assert_eq!(
        parsed.to_sexp(),
        "(source_file (program_declaration (identifier) (block (assignment (identifier) (integer_literal)))))"
    );
}

#[test]
fn missing_end_if_reports_once() {
    let source = "PROGRAM Test\nIF x > 0 THEN\n  y := 1;\nEND_PROGRAM";
    assert_eq!(error_messages(source), vec!["expected END_IF"]);
    assert_eq!(
        parse(source).to_sexp(),
        "(source_file (program_declaration (identifier) (block \
         (if_statement (comparison_operator (identifier) (integer_literal)) \
         (block (assignment (identifier) (integer_literal)))))))"
    );
}

#[test]
fn missing_then() {
    let source = "IF x > 0\n  y := 1;\nEND_IF;";
    assert_eq!(error_messages(source), vec!["expected THEN"]);
    assert_eq!(
        parse(source).to_sexp(),
        "(source_file (block (if_statement (comparison_operator (identifier) (integer_literal)) \
         (block (assignment (identifier) (integer_literal))))))"
    );
}

#[test]
fn missing_end_case() {
    assert_eq!(
        error_messages("CASE x OF 1: y := 2;\nz := 3;"),
        vec!["expected END_CASE"]
    );
}

#[test]
fn missing_semicolon_is_inserted() {
    let source = "PROGRAM Test\n  x := 1\n  y := 2;\nEND_PROGRAM";
    let parsed = parse(source);
    assert_eq!(error_messages(source), vec!["expected ';'"]);
    let error = &parsed.errors()[0];
    assert_eq!(
        (u32::from(error.range.start()), u32::from(error.range.end())),
        (24, 25)
    );
    assert_eq!(
        parsed.to_sexp(),
        "(source_file (program_declaration (identifier) (block \
         (assignment (identifier) (integer_literal)) \
         (assignment (identifier) (integer_literal)))))"
    );
}

#[test]
fn garbage_in_body_is_lexical_only() {
    let source = "PROGRAM Test\n  @@@ invalid @@@\nEND_PROGRAM";
    let parsed = parse(source);
    assert_lossless(source, &parsed);
    assert_spans(&parsed.syntax());
    assert!(!parsed.ok());
    assert!(parsed
        .errors()
        .iter()
        .all(|error| error.kind == ParseErrorKind::Lexical
            && error.message == "unrecognized input"));
    assert!(parsed.to_sexp().starts_with("(source_file (program_declaration (identifier)"));
}

#[test]
fn unexpected_statement_start() {
    let source = "x := 1;\n5 + 3;\ny := 2;";
    assert_eq!(error_messages(source), vec!["expected statement"]);
    assert_eq!(
        parse(source).to_sexp(),
        "(source_file (block (assignment (identifier) (integer_literal)) (ERROR) (noop) \
         (assignment (identifier) (integer_literal))))"
    );
}

#[test]
fn statements_before_declarations() {
    let source = "x := 1;\nPROGRAM P END_PROGRAM";
    assert_eq!(
        error_messages(source),
        vec!["declarations cannot be mixed with statements"]
    );
    assert_eq!(
        parse(source).to_sexp(),
        "(source_file (block (assignment (identifier) (integer_literal))) (ERROR))"
    );
}

#[test]
fn statements_after_declarations() {
    let source = "PROGRAM P END_PROGRAM\nx := 1;";
    assert_eq!(
        error_messages(source),
        vec!["expected FUNCTION_BLOCK, FUNCTION, PROGRAM, or TYPE"]
    );
    assert_eq!(
        parse(source).to_sexp(),
        "(source_file (program_declaration (identifier)) (ERROR))"
    );
}

#[test]
fn missing_colon_in_declaration() {
    let source = "PROGRAM P\nVAR\n  x INT;\n  y : BOOL;\nEND_VAR\nEND_PROGRAM";
    assert_eq!(error_messages(source), vec!["expected ':'"]);
    assert_eq!(
        parse(source).to_sexp(),
        "(source_file (program_declaration (identifier) (var_section \
         (var_decl (identifier) (identifier)) \
         (var_decl (identifier) (identifier)))))"
    );
}

#[test]
fn missing_end_var() {
    assert_eq!(
        error_messages("PROGRAM P\nVAR x : INT;\nEND_PROGRAM"),
        vec!["expected END_VAR"]
    );
}

#[test]
fn errors_are_ordered_by_position() {
    let parsed = parse("x := @;\nIF a\n  y := 1;\nEND_IF;");
    let starts: Vec<u32> = parsed
        .errors()
        .iter()
        .map(|error| u32::from(error.range.start()))
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    assert_eq!(parsed.errors()[0].kind, ParseErrorKind::Lexical);
    assert_eq!(parsed.errors()[1].message, "expected THEN");
}

#[test]
fn arbitrary_input_never_panics() {
    let inputs = [
        "",
        ")",
        "END_IF",
        "IF",
        "CASE",
        "(((((",
        "x := ",
        "PROGRAM",
        "TYPE",
        "TYPE T : INT; END_TYPE",
        "VAR",
        "FUNCTION f :",
        "ARRAY[",
        "fb(a :=",
        "x := 1..2;",
        "{",
        "'",
        "(*",
        "T#",
        "NOT",
        "x.y.",
        "CASE x OF 1..: END_CASE",
        "PROGRAM P VAR a : ARRAY[1.. OF INT; END_VAR END_PROGRAM",
        "FUNCTION_BLOCK FB VAR_INPUT END_FUNCTION_BLOCK",
        "IF a THEN ELSIF ELSE END_CASE",
    ];
    for source in inputs {
        let parsed = parse(source);
        assert_lossless(source, &parsed);
        assert_spans(&parsed.syntax());
    }
}

#[test]
fn deep_unary_nesting_is_cut_off() {
    let source = format!("x := {}1;\ny := 2;", "-".repeat(10_000));
    assert_eq!(error_messages(&source), vec!["nesting too deep"]);
    let sexp = parse(&source).to_sexp();
    assert!(sexp.ends_with("(assignment (identifier) (integer_literal))))"), "{sexp}");
}

#[test]
fn deep_parentheses_are_cut_off() {
    let source = format!("x := {}1{};", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(error_messages(&source), vec!["nesting too deep"]);
}

#[test]
fn long_right_associative_chain_is_cut_off() {
    let source = format!("x := 1{};", " ** 1".repeat(10_000));
    assert_eq!(error_messages(&source), vec!["nesting too deep"]);
}

#[test]
fn deep_type_nesting_is_cut_off() {
    let source = format!(
        "PROGRAM P VAR x : {}INT; END_VAR END_PROGRAM",
        "ARRAY[0..1] OF ".repeat(10_000)
    );
    let messages = error_messages(&source);
    assert!(!messages.is_empty());
    assert!(messages.iter().all(|message| message == "nesting too deep"), "{messages:?}");
}

#[test]
fn deep_statement_nesting_is_cut_off() {
    let depth = 5_000;
    let source = format!(
        "{}x := 1;{}\ny := 2;",
        "IF a THEN ".repeat(depth),
        " END_IF;".repeat(depth)
    );
    let messages = error_messages(&source);
    assert!(!messages.is_empty());
    assert!(messages.iter().all(|message| message == "nesting too deep"), "{messages:?}");
    assert_eq!(parse(&source).source_file().block().unwrap().statements().count(), 2);
}

#[test]
fn shallow_nesting_is_not_limited() {
    let source = format!("x := {}1{};", "(".repeat(100), ")".repeat(100));
    parse_ok(&source);
}
