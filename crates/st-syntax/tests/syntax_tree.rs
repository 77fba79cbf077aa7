mod common;
use common::*;

use expect_test::expect;
use st_syntax::ast::{AstNode, Declaration, Expr, Stmt};
use st_syntax::syntax::debug_tree;

const MOTOR: &str = r#"
(* Motor control block *)
{attribute 'qualified_only'}
FUNCTION_BLOCK FB_Motor
VAR_INPUT
    enable : BOOL;      // start request
    setpoint : REAL := 0.0;
END_VAR
VAR_OUTPUT
    running : BOOL;
END_VAR
VAR
    ramp : TON;
    history : ARRAY[1..10] OF REAL;
END_VAR

ramp(IN := enable, PT := T#2s500ms);
IF enable AND NOT ramp.Q THEN
    running := FALSE;
ELSIF ramp.Q THEN
    running := TRUE;
    history[1] := setpoint;
ELSE
    ;
END_IF;

CASE REAL_TO_INT(setpoint) OF
    0: running := FALSE;
    1..100, 200: RETURN;
END_CASE;
END_FUNCTION_BLOCK
"#;

#[test]
fn debug_tree_dump() {
    let parsed = parse_ok("x := a + 1;");
    expect![[r#"
SourceFile@0..11
  Block@0..11
    Assignment@0..10
      Identifier@0..1
        Ident@0..1 "x"
      Assign@2..4 ":="
      BinaryOperator@5..10
        Identifier@5..6
          Ident@5..6 "a"
        Plus@7..8 "+"
        IntegerLiteral@9..10
          IntLiteral@9..10 "1"
    Semicolon@10..11 ";"
"#]]
    .assert_eq(&parsed.debug_tree());
}

#[test]
fn trivia_placement_dump() {
    let parsed = parse_ok("a := 1; // c");
    expect![[r#"
SourceFile@0..12
  Block@0..7
    Assignment@0..6
      Identifier@0..1
        Ident@0..1 "a"
      Whitespace@1..2 " "
      Assign@2..4 ":="
      Whitespace@4..5 " "
      IntegerLiteral@5..6
        IntLiteral@5..6 "1"
    Semicolon@6..7 ";"
  Whitespace@7..8 " "
  LineComment@8..12 "// c"
"#]]
    .assert_eq(&debug_tree(&parsed.syntax(), true));
}

#[test]
fn realistic_block_is_lossless_with_tight_spans() {
    // `history[1]` indexing is outside the grammar, so only check the
    // tree invariants here.
    let parsed = parse(MOTOR);
    assert_lossless(MOTOR, &parsed);
    assert_spans(&parsed.syntax());
}

#[test]
fn realistic_block_without_indexing() {
    let source = MOTOR.replace("    history[1] := setpoint;\n", "");
    let parsed = parse_ok(&source);
    let file = parsed.source_file();

    assert_eq!(file.pragmas().count(), 1);
    let Some(Declaration::FunctionBlockDeclaration(fb)) = file.declarations().next() else {
        panic!("expected function block");
    };
    assert_eq!(fb.name().unwrap().name(), "FB_Motor");
    assert_eq!(fb.var_sections().count(), 3);

    let body = fb.body().unwrap();
    let statements: Vec<_> = body.statements().collect();
    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[0], Stmt::FbInvocation(_)));
    assert!(matches!(statements[1], Stmt::IfStatement(_)));
    let Stmt::CaseStatement(case) = &statements[2] else {
        panic!("expected CASE");
    };
    assert_eq!(case.value().unwrap().text(), "REAL_TO_INT(setpoint)");
    let second = case.items().nth(1).unwrap();
    assert_eq!(second.labels().count(), 2);
    assert!(matches!(
        second.body().unwrap().statements().next(),
        Some(Stmt::ReturnStatement(_))
    ));

    let enable = fb
        .var_sections()
        .next()
        .and_then(|section| section.declarations().next())
        .unwrap();
    let comments: Vec<_> = enable
        .comments()
        .iter()
        .map(|comment| comment.text().to_string())
        .collect();
    assert_eq!(comments, vec!["// start request"]);

    let all: Vec<_> = file
        .comments()
        .iter()
        .map(|comment| comment.text().to_string())
        .collect();
    assert_eq!(all, vec!["(* Motor control block *)", "// start request"]);
}

#[test]
fn every_node_kind_renders_in_sexp() {
    let sexp = sexp(
        "TYPE S : STRUCT f : INT; END_STRUCT END_TYPE\n\
         FUNCTION F : BOOL VAR_INPUT a : ARRAY[0..1] OF INT; END_VAR F := TRUE; END_FUNCTION\n\
         PROGRAM P\n\
         VAR x : INT; END_VAR\n\
         {p}\n\
         ;\n\
         x := -(1 + 2) * 3 MOD 4;\n\
         b := a AND x < 2 OR x = 3;\n\
         s := 'str'; r := 1.5; t := T#1s; q := o.p;\n\
         y := MAX(1, x); z := INT_TO_REAL(x);\n\
         fb(IN := x, Q => y);\n\
         IF x THEN ; ELSIF y THEN ; ELSE ; END_IF;\n\
         CASE x OF 1..2: ; END_CASE;\n\
         RETURN;\n\
         END_PROGRAM",
    );
    for name in [
        "source_file",
        "type_declaration",
        "struct_definition",
        "struct_field",
        "function_declaration",
        "var_section",
        "var_decl",
        "array_type",
        "array_range",
        "program_declaration",
        "pragma",
        "block",
        "noop",
        "assignment",
        "unary_expression",
        "parenthesized_expression",
        "binary_operator",
        "boolean_operator",
        "comparison_operator",
        "equality_operator",
        "string_literal",
        "float_literal",
        "time_literal",
        "boolean_literal",
        "integer_literal",
        "qualified_identifier",
        "function_call",
        "type_conversion",
        "argument_list",
        "param_assignment",
        "fb_invocation",
        "if_statement",
        "elsif_clause",
        "else_clause",
        "case_statement",
        "case_item",
        "case_label",
        "(return)",
        "identifier",
    ] {
        assert!(sexp.contains(name), "missing {name} in {sexp}");
    }
    assert!(!sexp.contains("ERROR"));
}

#[test]
fn pragmas_between_expression_tokens() {
    let expected =
        "(assignment (identifier) (binary_operator (integer_literal) (pragma) (integer_literal)))";
    assert_eq!(statement_sexp("a := 1 + {p} 2;"), expected);
    assert_eq!(statement_sexp("a := 1 (* c *) + {pr} 2;"), expected);
    assert_eq!(statement_sexp("a := 1 {p} * 2;"), expected);
    assert_eq!(
        statement_sexp("a := -{p} b;"),
        "(assignment (identifier) (unary_expression (pragma) (identifier)))"
    );
    assert_eq!(
        statement_sexp("a := 1 {p};"),
        "(assignment (identifier) (integer_literal) (pragma))"
    );

    let parsed = parse_ok("a := 1 + {p} 2;");
    let Some(Stmt::Assignment(assignment)) = parsed
        .source_file()
        .block()
        .and_then(|block| block.statements().next())
    else {
        panic!("expected assignment");
    };
    let Some(Expr::BinaryOperator(sum)) = assignment.expression() else {
        panic!("expected binary operator");
    };
    assert_eq!(sum.left().unwrap().syntax().to_string(), "1");
    assert_eq!(sum.operator().unwrap().text(), "+");
    assert_eq!(sum.right().unwrap().syntax().to_string(), "2");
}

#[test]
fn pragmas_inside_statements_and_declarations() {
    for (source, pragmas) in [
        ("IF a {p} THEN x := f({p} 1 {q}, b); END_IF;", 3),
        ("x {p} := 1;", 1),
        ("CASE x OF {p} 1 {q}, 2..{r}3: y := 1; END_CASE;", 3),
        ("RETURN 1 {p};", 1),
        ("PROGRAM P VAR x {a} : INT {b} := 1 {c}; END_VAR END_PROGRAM", 3),
        ("PROGRAM P VAR x : ARRAY[0..{n}9] OF {t} INT; END_VAR END_PROGRAM", 2),
    ] {
        let sexp = sexp(source);
        assert_eq!(sexp.matches("(pragma)").count(), pragmas, "{source}: {sexp}");
        assert!(!sexp.contains("ERROR"), "{source}: {sexp}");
    }
}

#[test]
fn pragma_before_next_statement_stays_a_block_item() {
    assert_eq!(
        sexp("x := 1;\n{p}\ny := 2;"),
        "(source_file (block (assignment (identifier) (integer_literal)) (pragma) \
         (assignment (identifier) (integer_literal))))"
    );
}
