use crate::Span;

use super::{
    ast::{FnBody, NodeId, StmtList},
    expressions::{Expr, Identifier},
    types::TypeSpec,
};

/// Statement node
///
/// Declarations are statements too, so a function body and the program's
/// top level share one list type.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    VarDecl(VarDecl),
    FnDecl(FnDecl),
    /// Expression is always an `ExprKind::Assign`.
    Assign(Expr),
    PostInc(Expr),
    PostDec(Expr),
    Read(Expr),
    Write(Expr),
    If {
        condition: Expr,
        body: StmtList,
    },
    IfElse {
        condition: Expr,
        then_body: StmtList,
        else_body: StmtList,
    },
    While {
        condition: Expr,
        body: StmtList,
    },
    Return(Option<Expr>),
    /// Expression is always an `ExprKind::Call`.
    Call(Expr),
    Expr(Expr),
}

/// Variable declaration `type name;`. Also used for formal parameters.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub id: NodeId,
    pub type_spec: TypeSpec,
    pub name: Identifier,
    pub span: Span,
}

/// Function declaration `type name(formals) { body }`.
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub return_type: TypeSpec,
    pub name: Identifier,
    pub formals: Vec<VarDecl>,
    pub body: FnBody,
}
