use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Program, StmtList},
        expressions::{Expr, ExprKind, Identifier},
        statements::{FnDecl, Stmt, StmtKind, VarDecl},
        types::{BaseType, DataType},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::symbols::{Symbol, SymbolId, SymbolKind, SymbolTable};

/// One lexical scope.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, SymbolId>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    pub fn declare_variable(&mut self, identifier: &Identifier, symbol: SymbolId) -> Result<(), Error> {
        if self.variable_lookup.contains_key(&identifier.name) {
            Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: identifier.name.clone(),
                },
                identifier.span.start.clone(),
            ))
        } else {
            self.variable_lookup.insert(identifier.name.clone(), symbol);
            Ok(())
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<SymbolId> {
        self.variable_lookup.get(variable_name).copied()
    }
}

pub struct Resolver {
    table: SymbolTable,
    environments: Vec<Environment>,
    errors: Vec<Error>,
}

impl Resolver {
    pub fn new(node_count: u32) -> Self {
        Resolver {
            table: SymbolTable::new(node_count),
            environments: vec![Environment::new()],
            errors: vec![],
        }
    }

    fn push_environment(&mut self) {
        self.environments.push(Environment::new());
    }

    fn pop_environment(&mut self) {
        self.environments.pop();
    }

    fn report(&mut self, error: Error) {
        trace!(error = %error.kind(), "resolution error");
        self.errors.push(error);
    }

    /// Adds a symbol for `name`, binds the name node to it and enters it into
    /// the innermost scope.
    fn declare(&mut self, name: &Identifier, data_type: DataType, kind: SymbolKind) {
        let symbol = self.table.add_symbol(Symbol {
            name: name.name.clone(),
            data_type,
            kind,
            position: name.span.start.clone(),
        });
        self.table.bind(name.id, symbol);

        let result = match self.environments.last_mut() {
            Some(environment) => environment.declare_variable(name, symbol),
            None => Ok(()),
        };
        if let Err(error) = result {
            self.report(error);
        }
    }

    fn fetch_variable(&self, name: &str) -> Option<SymbolId> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }

    fn resolve_identifier(&mut self, identifier: &Identifier) {
        match self.fetch_variable(&identifier.name) {
            Some(symbol) => self.table.bind(identifier.id, symbol),
            None => self.report(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: identifier.name.clone(),
                },
                identifier.span.start.clone(),
            )),
        }
    }

    fn check_declaration_type(&mut self, decl: &VarDecl) {
        if decl.type_spec.base == BaseType::Void && decl.type_spec.depth == 0 {
            self.report(Error::new(
                ErrorImpl::InvalidDeclarationType {
                    variable: decl.name.name.clone(),
                },
                decl.name.span.start.clone(),
            ));
        }
    }

    fn resolve_var_decl(&mut self, decl: &VarDecl, kind: SymbolKind) {
        self.check_declaration_type(decl);
        self.declare(&decl.name, decl.type_spec.to_data_type(), kind);
    }

    fn resolve_fn_decl(&mut self, decl: &FnDecl) {
        let params = decl
            .formals
            .iter()
            .map(|formal| formal.type_spec.to_data_type())
            .collect();
        let signature = DataType::function(params, decl.return_type.to_data_type());

        // Declared before the body so recursive calls resolve
        self.declare(&decl.name, signature, SymbolKind::Function);

        self.push_environment();
        for formal in &decl.formals {
            self.resolve_var_decl(formal, SymbolKind::Formal);
        }
        for stmt in decl.body.stmts.iter() {
            self.resolve_stmt(stmt);
        }
        self.pop_environment();
    }

    fn resolve_block(&mut self, list: &StmtList) {
        self.push_environment();
        for stmt in list.iter() {
            self.resolve_stmt(stmt);
        }
        self.pop_environment();
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.resolve_var_decl(decl, SymbolKind::Variable),
            StmtKind::FnDecl(decl) => self.resolve_fn_decl(decl),
            StmtKind::Assign(expr)
            | StmtKind::PostInc(expr)
            | StmtKind::PostDec(expr)
            | StmtKind::Read(expr)
            | StmtKind::Write(expr)
            | StmtKind::Call(expr)
            | StmtKind::Expr(expr) => self.resolve_expr(expr),
            StmtKind::If { condition, body } | StmtKind::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_block(body);
            }
            StmtKind::IfElse {
                condition,
                then_body,
                else_body,
            } => {
                self.resolve_expr(condition);
                self.resolve_block(then_body);
                self.resolve_block(else_body);
            }
            StmtKind::Return(value) => {
                if let Some(expr) = value {
                    self.resolve_expr(expr);
                }
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::IntLit(_) | ExprKind::True | ExprKind::False => {}
            ExprKind::Identifier(identifier) => self.resolve_identifier(identifier),
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Assign { target, source } => {
                self.resolve_expr(target);
                self.resolve_expr(source);
            }
            ExprKind::Call(call) => {
                self.resolve_identifier(&call.callee);
                for arg in &call.args.exprs {
                    self.resolve_expr(arg);
                }
            }
        }
    }
}

/// Resolves every identifier of `program`.
///
/// All resolution errors are collected before returning, in source order.
pub fn resolve(program: &Program) -> Result<SymbolTable, Vec<Error>> {
    let mut resolver = Resolver::new(program.node_count);

    for stmt in program.decls.iter() {
        resolver.resolve_stmt(stmt);
    }

    debug!(
        symbols = resolver.table.len(),
        errors = resolver.errors.len(),
        "resolved names"
    );

    if resolver.errors.is_empty() {
        Ok(resolver.table)
    } else {
        Err(resolver.errors)
    }
}
