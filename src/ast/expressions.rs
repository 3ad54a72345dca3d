use std::fmt::Display;

use crate::Span;

use super::ast::NodeId;

/// Identifier node
///
/// Used both for references inside expressions and for the names introduced
/// by declarations. Name resolution binds each identifier id to a symbol.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

/// Expression node
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntLit(i32),
    True,
    False,
    Identifier(Identifier),
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        source: Box<Expr>,
    },
    Call(CallExpr),
}

impl Expr {
    /// Whether the expression can appear on the left of `=`, `++`, `--` or
    /// after `read`.
    pub fn is_location(&self) -> bool {
        match &self.kind {
            ExprKind::Identifier(_) => true,
            ExprKind::Unary { operator: UnaryOp::Deref, .. } => true,
            _ => false,
        }
    }
}

/// Call expression `callee(args)`.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Identifier,
    pub args: ExprList,
}

/// Actual argument list of a call. Typed as a tuple of its elements.
#[derive(Debug, Clone)]
pub struct ExprList {
    pub id: NodeId,
    pub exprs: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

impl BinaryOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Divide)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOp::Equals | BinaryOp::NotEquals)
    }

    pub fn is_relational(&self) -> bool {
        matches!(self, BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEq | BinaryOp::GreaterEq)
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEq => "<=",
            BinaryOp::GreaterEq => ">=",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-e`
    Neg,
    /// `!e`
    Not,
    /// `*e`
    Deref,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Deref => "*",
        };
        write!(f, "{}", symbol)
    }
}
