//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable and pointer declarations
//! - Function declarations
//! - Operator precedence and associativity
//! - Control flow statements
//! - Node id allocation

use std::rc::Rc;

use crate::{
    ast::{
        ast::{NodeId, Program, StmtList},
        expressions::{BinaryOp, Expr, ExprKind, UnaryOp},
        statements::{Stmt, StmtKind},
        types::BaseType,
    },
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, crate::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.lake".to_string())).unwrap();
    parse(tokens, Rc::new("test.lake".to_string()))
}

fn first_expr(program: &Program) -> &Expr {
    match &program.decls.stmts[0].kind {
        StmtKind::Expr(expr) | StmtKind::Assign(expr) | StmtKind::Call(expr) => expr,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn collect_list(list: &StmtList, ids: &mut Vec<NodeId>) {
    ids.push(list.id);
    for stmt in list.iter() {
        collect_stmt(stmt, ids);
    }
}

fn collect_stmt(stmt: &Stmt, ids: &mut Vec<NodeId>) {
    ids.push(stmt.id);
    match &stmt.kind {
        StmtKind::VarDecl(decl) => {
            ids.push(decl.id);
            ids.push(decl.name.id);
        }
        StmtKind::FnDecl(decl) => {
            ids.push(decl.name.id);
            for formal in &decl.formals {
                ids.push(formal.id);
                ids.push(formal.name.id);
            }
            ids.push(decl.body.id);
            collect_list(&decl.body.stmts, ids);
        }
        StmtKind::Assign(e)
        | StmtKind::PostInc(e)
        | StmtKind::PostDec(e)
        | StmtKind::Read(e)
        | StmtKind::Write(e)
        | StmtKind::Call(e)
        | StmtKind::Expr(e) => collect_expr(e, ids),
        StmtKind::If { condition, body } | StmtKind::While { condition, body } => {
            collect_expr(condition, ids);
            collect_list(body, ids);
        }
        StmtKind::IfElse { condition, then_body, else_body } => {
            collect_expr(condition, ids);
            collect_list(then_body, ids);
            collect_list(else_body, ids);
        }
        StmtKind::Return(value) => {
            if let Some(e) = value {
                collect_expr(e, ids);
            }
        }
    }
}

fn collect_expr(expr: &Expr, ids: &mut Vec<NodeId>) {
    ids.push(expr.id);
    match &expr.kind {
        ExprKind::IntLit(_) | ExprKind::True | ExprKind::False => {}
        ExprKind::Identifier(identifier) => ids.push(identifier.id),
        ExprKind::Binary { left, right, .. } => {
            collect_expr(left, ids);
            collect_expr(right, ids);
        }
        ExprKind::Unary { operand, .. } => collect_expr(operand, ids),
        ExprKind::Assign { target, source } => {
            collect_expr(target, ids);
            collect_expr(source, ids);
        }
        ExprKind::Call(call) => {
            ids.push(call.callee.id);
            ids.push(call.args.id);
            for arg in &call.args.exprs {
                collect_expr(arg, ids);
            }
        }
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_source("int x;").unwrap();

    match &program.decls.stmts[0].kind {
        StmtKind::VarDecl(decl) => {
            assert_eq!(decl.name.name, "x");
            assert_eq!(decl.type_spec.base, BaseType::Int);
            assert_eq!(decl.type_spec.depth, 0);
        }
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_pointer_declaration() {
    let program = parse_source("bool** p;").unwrap();

    match &program.decls.stmts[0].kind {
        StmtKind::VarDecl(decl) => {
            assert_eq!(decl.type_spec.base, BaseType::Bool);
            assert_eq!(decl.type_spec.depth, 2);
        }
        other => panic!("expected variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_source("int add(int a, int* b) { return a + *b; }").unwrap();

    match &program.decls.stmts[0].kind {
        StmtKind::FnDecl(decl) => {
            assert_eq!(decl.name.name, "add");
            assert_eq!(decl.formals.len(), 2);
            assert_eq!(decl.formals[1].type_spec.depth, 1);
            assert_eq!(decl.body.stmts.len(), 1);
        }
        other => panic!("expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_without_formals() {
    let program = parse_source("void f() { }").unwrap();

    match &program.decls.stmts[0].kind {
        StmtKind::FnDecl(decl) => {
            assert!(decl.formals.is_empty());
            assert!(decl.body.stmts.is_empty());
        }
        other => panic!("expected function declaration, got {:?}", other),
    }
}

#[test]
fn test_nested_function_is_rejected() {
    let result = parse_source("void f() { int g() { } }");

    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let program = parse_source("1 + 2 * 3;").unwrap();

    match &first_expr(&program).kind {
        ExprKind::Binary { operator, right, .. } => {
            assert_eq!(*operator, BinaryOp::Plus);
            assert!(matches!(right.kind, ExprKind::Binary { operator: BinaryOp::Times, .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    let program = parse_source("a || b && c;").unwrap();

    match &first_expr(&program).kind {
        ExprKind::Binary { operator, right, .. } => {
            assert_eq!(*operator, BinaryOp::Or);
            assert!(matches!(right.kind, ExprKind::Binary { operator: BinaryOp::And, .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_relational_binds_tighter_than_equality() {
    let program = parse_source("a == b < c;").unwrap();

    match &first_expr(&program).kind {
        ExprKind::Binary { operator, right, .. } => {
            assert_eq!(*operator, BinaryOp::Equals);
            assert!(matches!(right.kind, ExprKind::Binary { operator: BinaryOp::Less, .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    let program = parse_source("a - b - c;").unwrap();

    match &first_expr(&program).kind {
        ExprKind::Binary { left, operator, .. } => {
            assert_eq!(*operator, BinaryOp::Minus);
            assert!(matches!(left.kind, ExprKind::Binary { operator: BinaryOp::Minus, .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    let program = parse_source("a = b = 1;").unwrap();

    assert!(matches!(program.decls.stmts[0].kind, StmtKind::Assign(_)));
    match &first_expr(&program).kind {
        ExprKind::Assign { target, source } => {
            assert!(matches!(target.kind, ExprKind::Identifier(_)));
            assert!(matches!(source.kind, ExprKind::Assign { .. }));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_prefix_binds_tighter_than_binary() {
    let program = parse_source("-a + b;").unwrap();

    match &first_expr(&program).kind {
        ExprKind::Binary { left, .. } => {
            assert!(matches!(left.kind, ExprKind::Unary { operator: UnaryOp::Neg, .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_deref_and_multiplication() {
    let program = parse_source("*p * 2;").unwrap();

    match &first_expr(&program).kind {
        ExprKind::Binary { left, operator, .. } => {
            assert_eq!(*operator, BinaryOp::Times);
            assert!(matches!(left.kind, ExprKind::Unary { operator: UnaryOp::Deref, .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    let program = parse_source("(1 + 2) * 3;").unwrap();

    match &first_expr(&program).kind {
        ExprKind::Binary { left, operator, .. } => {
            assert_eq!(*operator, BinaryOp::Times);
            assert!(matches!(left.kind, ExprKind::Binary { operator: BinaryOp::Plus, .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_call_statement() {
    let program = parse_source("f(1, true, x);").unwrap();

    assert!(matches!(program.decls.stmts[0].kind, StmtKind::Call(_)));
    match &first_expr(&program).kind {
        ExprKind::Call(call) => {
            assert_eq!(call.callee.name, "f");
            assert_eq!(call.args.exprs.len(), 3);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_call_on_non_identifier_is_rejected() {
    assert!(parse_source("(f)(1);").is_ok());
    assert!(parse_source("1(2);").is_err());
}

#[test]
fn test_parse_increment_and_decrement() {
    let program = parse_source("x++; *p--;").unwrap();

    assert!(matches!(program.decls.stmts[0].kind, StmtKind::PostInc(_)));
    assert!(matches!(program.decls.stmts[1].kind, StmtKind::PostDec(_)));
}

#[test]
fn test_increment_needs_location() {
    assert!(parse_source("1++;").is_err());
}

#[test]
fn test_invalid_assignment_target() {
    let result = parse_source("1 = x;");

    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorImpl::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_parse_read_and_write() {
    let program = parse_source("read x; write x + 1;").unwrap();

    assert!(matches!(program.decls.stmts[0].kind, StmtKind::Read(_)));
    assert!(matches!(program.decls.stmts[1].kind, StmtKind::Write(_)));
}

#[test]
fn test_parse_if_statement() {
    let program = parse_source("if (x > 0) { write x; }").unwrap();

    match &program.decls.stmts[0].kind {
        StmtKind::If { body, .. } => assert_eq!(body.len(), 1),
        other => panic!("expected if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_statement() {
    let program = parse_source("if (x) { write 1; } else { write 2; write 3; }").unwrap();

    match &program.decls.stmts[0].kind {
        StmtKind::IfElse { then_body, else_body, .. } => {
            assert_eq!(then_body.len(), 1);
            assert_eq!(else_body.len(), 2);
        }
        other => panic!("expected if-else statement, got {:?}", other),
    }
}

#[test]
fn test_parse_while_loop() {
    let program = parse_source("while (x < 10) { x = x + 1; }").unwrap();

    assert!(matches!(program.decls.stmts[0].kind, StmtKind::While { .. }));
}

#[test]
fn test_parse_return_with_and_without_value() {
    let program = parse_source("return; return 1;").unwrap();

    assert!(matches!(program.decls.stmts[0].kind, StmtKind::Return(None)));
    assert!(matches!(program.decls.stmts[1].kind, StmtKind::Return(Some(_))));
}

#[test]
fn test_missing_semicolon() {
    let result = parse_source("int x");

    assert!(matches!(result.unwrap_err().kind(), ErrorImpl::UnexpectedToken { .. }));
}

#[test]
fn test_unclosed_block() {
    assert!(parse_source("void f() { return;").is_err());
}

#[test]
fn test_number_out_of_range() {
    let result = parse_source("99999999999;");

    assert!(matches!(result.unwrap_err().kind(), ErrorImpl::NumberParseError { .. }));
}

#[test]
fn test_empty_program() {
    let program = parse_source("").unwrap();

    assert!(program.decls.is_empty());
    assert_eq!(program.node_count, 2);
}

#[test]
fn test_node_ids_are_dense_and_unique() {
    let source = "int g; bool* p; \
                  int f(int a, bool b) { if (b) { a++; } else { a = a - 1; } return a; } \
                  while (g < 3) { g = f(g, *p); } write -g;";
    let program = parse_source(source).unwrap();

    let mut ids = vec![program.id];
    collect_list(&program.decls, &mut ids);
    ids.sort();

    let expected: Vec<NodeId> = (0..program.node_count).map(NodeId).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_spans_cover_statements() {
    let program = parse_source("int x;\nx = 1;").unwrap();
    let stmt = &program.decls.stmts[1];

    assert_eq!(stmt.span.start.0, 7);
    assert_eq!(stmt.span.end.0, 13);
}
