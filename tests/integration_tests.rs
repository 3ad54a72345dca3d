//! Integration tests for the whole front end.
//!
//! These tests run source text through tokenization, parsing, name
//! resolution and type checking via `check_source`, and inspect the
//! annotations and diagnostics that come out.

use lakec::{
    ast::{
        expressions::{Expr, ExprKind},
        statements::StmtKind,
        types::{BaseType, DataType},
    },
    check_source,
    errors::errors::ErrorImpl,
    render_error, Checked, FrontEndError,
};

fn checked(source: &str) -> Checked {
    check_source(source, "test.lake").expect("front end should accept the program")
}

fn error_names(checked: &Checked) -> Vec<&str> {
    checked.result.diagnostics.iter().map(|e| e.get_error_name()).collect()
}

fn top_level_expr(checked: &Checked, index: usize) -> &Expr {
    match &checked.program.decls.stmts[index].kind {
        StmtKind::Assign(expr) | StmtKind::Call(expr) | StmtKind::Expr(expr) => expr,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_bad_operand_end_to_end() {
    let checked = checked("int a; a + true;");

    let plus = top_level_expr(&checked, 1);
    assert_eq!(checked.result.type_of(plus.id), Some(&DataType::Error));

    assert_eq!(checked.result.diagnostics.len(), 1);
    let diagnostic = &checked.result.diagnostics[0];
    assert!(matches!(diagnostic.kind(), ErrorImpl::BadMathOperand { .. }));

    // Located at the `true` literal
    let literal = match &plus.kind {
        ExprKind::Binary { right, .. } => right,
        other => panic!("expected binary expression, got {:?}", other),
    };
    assert_eq!(diagnostic.get_position(), &literal.span.start);
    assert!(!checked.success());
}

#[test]
fn test_void_call_statement_end_to_end() {
    let checked = checked("void f(){ return; } f();");

    assert!(checked.result.diagnostics.is_empty());
    assert!(checked.success());

    let call_stmt = &checked.program.decls.stmts[1];
    assert!(matches!(call_stmt.kind, StmtKind::Call(_)));
    assert_eq!(checked.result.type_of(call_stmt.id), Some(&DataType::Void));
}

#[test]
fn test_assignment_of_call_end_to_end() {
    let checked = checked("int f(int x){ return x; } int y; y = f(3);");

    assert!(checked.result.diagnostics.is_empty());

    let assignment = top_level_expr(&checked, 2);
    assert!(matches!(assignment.kind, ExprKind::Assign { .. }));
    assert_eq!(checked.result.type_of(assignment.id), Some(&DataType::Int));
}

#[test]
fn test_int_arithmetic_never_reports() {
    let checked = checked(
        "int a; int b; \
         a + b; a - b; a * b; a / b; \
         (a + b) * (a - b) / 2; -a + -b;",
    );

    for index in 2..8 {
        let expr = top_level_expr(&checked, index);
        assert_eq!(checked.result.type_of(expr.id), Some(&DataType::Int));
    }
    assert!(checked.success());
}

#[test]
fn test_bad_dereference_yields_single_diagnostic() {
    for source in ["int n; *n;", "bool b; *b;", "void f() { } *f;", "int n; **n;"] {
        let checked = checked(source);
        let deref = top_level_expr(&checked, 1);

        assert_eq!(checked.result.type_of(deref.id), Some(&DataType::Error), "{}", source);
        assert_eq!(error_names(&checked), vec!["BadDereference"], "{}", source);
    }
}

#[test]
fn test_arity_mismatch_independent_of_argument_types() {
    let sources = [
        "int f(int a, int b) { return a; } f(1);",
        "int f(int a, int b) { return a; } f(true);",
        "int f(int a, int b) { return a; } f(1, 2, 3);",
        "int f(int a, int b) { return a; } f(false, true, 3);",
        "int f() { return 1; } f(1);",
    ];

    for source in sources {
        let checked = checked(source);
        let call = top_level_expr(&checked, 1);

        assert_eq!(checked.result.type_of(call.id), Some(&DataType::Error), "{}", source);
        assert_eq!(error_names(&checked), vec!["BadArgumentCount"], "{}", source);
    }
}

#[test]
fn test_pointer_equality_depths() {
    let mismatch = checked("int* p1; int** p2; p1 == p2;");
    let expr = top_level_expr(&mismatch, 2);
    assert_eq!(mismatch.result.type_of(expr.id), Some(&DataType::Error));
    assert_eq!(error_names(&mismatch), vec!["BadEqualityOperator"]);

    let matching = checked("int* p1; int* p2; p1 == p2; p1 != p2;");
    for index in 2..4 {
        let expr = top_level_expr(&matching, index);
        assert_eq!(matching.result.type_of(expr.id), Some(&DataType::Bool));
    }
    assert!(matching.result.diagnostics.is_empty());
}

#[test]
fn test_return_value_rules() {
    let extra = checked("void f() { return 1; }");
    assert_eq!(
        extra.result.type_of(extra.program.decls.stmts[0].id),
        Some(&DataType::Error)
    );
    assert_eq!(error_names(&extra), vec!["ExtraReturnValue"]);

    let missing = checked("int f() { return; }");
    assert_eq!(error_names(&missing), vec!["MissingReturnValue"]);

    let pointer = checked("bool** f(bool** p) { return p; }");
    assert!(pointer.success());
}

#[test]
fn test_all_errors_reported_in_one_run() {
    let checked = checked(
        "int n; bool b; int* p;\n\
         void f(int x) {\n\
             read f;\n\
             write f;\n\
             if (x) { return; }\n\
             while (b) { p = n; }\n\
         }\n\
         f(b);\n\
         n = b + 1;\n",
    );

    assert_eq!(
        error_names(&checked),
        vec![
            "ReadIntoFunction",
            "WriteFromFunction",
            "BadCondition",
            "BadAssignOperator",
            "BadArgumentType",
            "BadMathOperand",
        ]
    );
    assert_eq!(checked.result.type_of(checked.program.id), Some(&DataType::Error));
}

#[test]
fn test_pass_is_deterministic() {
    let source = "int a; bool b; int* p; int f() { return true; } \
                  a = b; a + p + p; if (a) { write a; } *a; f(1);";

    let first = checked(source);
    let second = checked(source);

    assert_eq!(first.result.annotations, second.result.annotations);
    assert_eq!(first.result.diagnostics, second.result.diagnostics);
    assert_eq!(
        error_names(&first),
        vec![
            "BadReturnValue",
            "BadAssignOperator",
            "BadMathOperator",
            "BadCondition",
            "BadDereference",
            "BadArgumentCount",
        ]
    );
}

#[test]
fn test_annotations_cover_every_node() {
    let checked = checked(
        "int** g; \
         bool h(int* p, bool q) { if (q) { *p = 1; } else { p++; } return *p == 2; } \
         h(*g, !h(*g, true));",
    );

    assert!(checked.success());
    assert_eq!(checked.result.annotations.len(), checked.program.node_count as usize);
}

#[test]
fn test_pointer_types_in_annotations() {
    let checked = checked("bool** g; *g; **g;");

    let once = top_level_expr(&checked, 1);
    let twice = top_level_expr(&checked, 2);
    assert_eq!(
        checked.result.type_of(once.id),
        Some(&DataType::pointer(BaseType::Bool, 1))
    );
    assert_eq!(checked.result.type_of(twice.id), Some(&DataType::Bool));
}

#[test]
fn test_front_end_errors_stop_before_type_checking() {
    assert!(matches!(check_source("int a = 1;", "test.lake"), Err(FrontEndError::Parse(_))));
    assert!(matches!(check_source("int a; a # 1;", "test.lake"), Err(FrontEndError::Lex(_))));

    match check_source("x = 1; int y; int y;", "test.lake") {
        Err(error @ FrontEndError::Resolve(_)) => assert_eq!(error.errors().len(), 2),
        other => panic!("expected resolution errors, got {:?}", other.map(|c| c.result.diagnostics)),
    }
}

#[test]
fn test_rendered_diagnostic_points_at_operand() {
    let source = "int a;\na + true;\n";
    let checked = checked(source);

    let rendered = render_error(&checked.result.diagnostics[0], source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert!(lines[0].starts_with("Error: BadMathOperand"));
    assert_eq!(lines[1], "-> test.lake:2:5");
    assert_eq!(lines[3], "2 | a + true;");
    assert_eq!(lines[4], "  | ----^");
}
