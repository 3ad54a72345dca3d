use std::fmt::Display;

use crate::Span;

use super::statements::Stmt;

/// Dense per-node index handed out by the parser.
///
/// Every node of one parsed program has a distinct id in `0..node_count`,
/// which lets later passes keep per-node data in plain vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Program root
///
/// Holds the top-level declaration list. Top-level items may be
/// declarations or plain statements.
#[derive(Debug, Clone)]
pub struct Program {
    pub id: NodeId,
    pub decls: StmtList,
    pub span: Span,
    /// Number of ids allocated while parsing this program.
    pub node_count: u32,
}

/// Statement (or declaration) list
#[derive(Debug, Clone)]
pub struct StmtList {
    pub id: NodeId,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl StmtList {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.stmts.iter()
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// Function body, wrapping the statement list of a function declaration.
#[derive(Debug, Clone)]
pub struct FnBody {
    pub id: NodeId,
    pub stmts: StmtList,
    pub span: Span,
}
