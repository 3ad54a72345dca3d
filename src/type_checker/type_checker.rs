use tracing::debug;

use crate::{
    ast::{
        ast::{NodeId, Program, StmtList},
        expressions::{BinaryOp, CallExpr, Expr, ExprKind, Identifier, UnaryOp},
        statements::{FnDecl, Stmt, StmtKind, VarDecl},
        types::DataType,
    },
    errors::errors::{Error, ErrorImpl},
    resolver::symbols::SymbolTable,
    Position,
};

use super::{
    annotations::Annotations,
    diagnostics::{Diagnostics, TypeCheckFault},
};

/// State of one type-checking pass over one program.
pub struct TypeChecker<'a> {
    symbols: &'a SymbolTable,
    pub annotations: Annotations,
    pub diagnostics: Diagnostics,
}

impl<'a> TypeChecker<'a> {
    pub fn new(symbols: &'a SymbolTable, node_count: u32) -> Self {
        TypeChecker {
            symbols,
            annotations: Annotations::new(node_count),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn annotate(&mut self, node: NodeId, data_type: DataType) {
        self.annotations.assign(node, data_type);
    }

    pub fn node_type(&self, node: NodeId) -> Result<DataType, TypeCheckFault> {
        self.annotations.lookup(node).cloned()
    }

    pub fn report(&mut self, kind: ErrorImpl, position: &Position) {
        self.diagnostics.record(kind, position.clone());
    }

    pub fn symbol_type(&self, identifier: &Identifier) -> Result<DataType, TypeCheckFault> {
        self.symbols
            .symbol_of(identifier.id)
            .map(|symbol| symbol.data_type.clone())
            .ok_or_else(|| TypeCheckFault::UnboundIdentifier {
                name: identifier.name.clone(),
            })
    }
}

/// Outcome of type checking one program.
#[derive(Debug)]
pub struct TypeCheckResult {
    pub annotations: Annotations,
    /// Diagnostics in traversal order
    pub diagnostics: Vec<Error>,
    pub success: bool,
}

impl TypeCheckResult {
    pub fn type_of(&self, node: NodeId) -> Option<&DataType> {
        self.annotations.get(node)
    }
}

fn poisoned_or(valid: bool, data_type: DataType) -> DataType {
    if valid {
        data_type
    } else {
        DataType::Error
    }
}

pub fn type_check_identifier(
    type_checker: &mut TypeChecker,
    identifier: &Identifier,
) -> Result<(), TypeCheckFault> {
    let data_type = type_checker.symbol_type(identifier)?;
    type_checker.annotate(identifier.id, data_type);
    Ok(())
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Result<(), TypeCheckFault> {
    let data_type = match &expr.kind {
        ExprKind::IntLit(_) => DataType::Int,
        ExprKind::True | ExprKind::False => DataType::Bool,
        ExprKind::Identifier(identifier) => {
            type_check_identifier(type_checker, identifier)?;
            type_checker.node_type(identifier.id)?
        }
        ExprKind::Binary {
            left,
            operator,
            right,
        } => {
            type_check_expr(type_checker, left)?;
            type_check_expr(type_checker, right)?;

            if operator.is_arithmetic() {
                type_check_arithmetic(type_checker, expr, *operator, left, right)?
            } else if operator.is_logical() {
                type_check_logical(type_checker, left, right)?
            } else if operator.is_equality() {
                type_check_equality(type_checker, expr, left, right)?
            } else {
                type_check_relational(type_checker, left, right)?
            }
        }
        ExprKind::Unary { operator, operand } => {
            type_check_expr(type_checker, operand)?;
            type_check_unary(type_checker, expr, *operator, operand)?
        }
        ExprKind::Assign { target, source } => {
            type_check_expr(type_checker, target)?;
            type_check_expr(type_checker, source)?;
            type_check_assign(type_checker, expr, target, source)?
        }
        ExprKind::Call(call) => type_check_call(type_checker, call)?,
    };

    type_checker.annotate(expr.id, data_type);
    Ok(())
}

fn type_check_arithmetic(
    type_checker: &mut TypeChecker,
    expr: &Expr,
    operator: BinaryOp,
    left: &Expr,
    right: &Expr,
) -> Result<DataType, TypeCheckFault> {
    let left_type = type_checker.node_type(left.id)?;
    let right_type = type_checker.node_type(right.id)?;
    let mut valid = true;

    for (operand, operand_type) in [(left, &left_type), (right, &right_type)] {
        if operand_type.is_error() {
            valid = false;
        } else if !(operand_type.is_int() || operand_type.is_ptr()) {
            type_checker.report(
                ErrorImpl::BadMathOperand {
                    found: operand_type.to_string(),
                },
                &operand.span.start,
            );
            valid = false;
        }
    }

    if !valid {
        return Ok(DataType::Error);
    }

    let data_type = match (&left_type, &right_type) {
        (DataType::Int, DataType::Int) => DataType::Int,
        (DataType::Int, pointer @ DataType::Pointer { .. }) => pointer.clone(),
        (pointer @ DataType::Pointer { .. }, DataType::Int) => pointer.clone(),
        _ => {
            type_checker.report(
                ErrorImpl::BadMathOperator {
                    operator: operator.to_string(),
                    operands: format!("{} and {}", left_type, right_type),
                },
                &expr.span.start,
            );
            DataType::Error
        }
    };

    Ok(data_type)
}

fn type_check_logical(
    type_checker: &mut TypeChecker,
    left: &Expr,
    right: &Expr,
) -> Result<DataType, TypeCheckFault> {
    let left_type = type_checker.node_type(left.id)?;
    let right_type = type_checker.node_type(right.id)?;
    let mut valid = true;

    for (operand, operand_type) in [(left, &left_type), (right, &right_type)] {
        if operand_type.is_error() {
            valid = false;
        } else if !operand_type.is_bool() {
            type_checker.report(
                ErrorImpl::BadLogicalOperand {
                    found: operand_type.to_string(),
                },
                &operand.span.start,
            );
            valid = false;
        }
    }

    Ok(poisoned_or(valid, right_type))
}

fn type_check_relational(
    type_checker: &mut TypeChecker,
    left: &Expr,
    right: &Expr,
) -> Result<DataType, TypeCheckFault> {
    let left_type = type_checker.node_type(left.id)?;
    let right_type = type_checker.node_type(right.id)?;
    let mut valid = true;

    for (operand, operand_type) in [(left, &left_type), (right, &right_type)] {
        if operand_type.is_error() {
            valid = false;
        } else if !operand_type.is_int() {
            type_checker.report(
                ErrorImpl::BadRelationalOperand {
                    found: operand_type.to_string(),
                },
                &operand.span.start,
            );
            valid = false;
        }
    }

    Ok(poisoned_or(valid, DataType::Bool))
}

// At most one diagnostic per equality node: operand kinds first, then the
// exact type match.
fn type_check_equality(
    type_checker: &mut TypeChecker,
    expr: &Expr,
    left: &Expr,
    right: &Expr,
) -> Result<DataType, TypeCheckFault> {
    let left_type = type_checker.node_type(left.id)?;
    let right_type = type_checker.node_type(right.id)?;

    if left_type.is_error() || right_type.is_error() {
        return Ok(DataType::Error);
    }

    let bad_operand = [(left, &left_type), (right, &right_type)]
        .into_iter()
        .find(|(_, operand_type)| !operand_type.is_var());
    if let Some((operand, operand_type)) = bad_operand {
        type_checker.report(
            ErrorImpl::BadEqualityOperand {
                found: operand_type.to_string(),
            },
            &operand.span.start,
        );
        return Ok(DataType::Error);
    }

    if left_type != right_type {
        type_checker.report(
            ErrorImpl::BadEqualityOperator {
                left: left_type.to_string(),
                right: right_type.to_string(),
            },
            &expr.span.start,
        );
        return Ok(DataType::Error);
    }

    Ok(DataType::Bool)
}

fn type_check_unary(
    type_checker: &mut TypeChecker,
    expr: &Expr,
    operator: UnaryOp,
    operand: &Expr,
) -> Result<DataType, TypeCheckFault> {
    let operand_type = type_checker.node_type(operand.id)?;
    if operand_type.is_error() {
        return Ok(DataType::Error);
    }

    let data_type = match operator {
        UnaryOp::Neg => {
            if operand_type.is_int() {
                DataType::Int
            } else {
                type_checker.report(
                    ErrorImpl::BadMathOperator {
                        operator: operator.to_string(),
                        operands: operand_type.to_string(),
                    },
                    &expr.span.start,
                );
                DataType::Error
            }
        }
        UnaryOp::Not => {
            if operand_type.is_bool() {
                operand_type
            } else {
                type_checker.report(
                    ErrorImpl::BadLogicalOperand {
                        found: operand_type.to_string(),
                    },
                    &operand.span.start,
                );
                DataType::Error
            }
        }
        UnaryOp::Deref => match operand_type.deref() {
            Some(data_type) => data_type,
            None => {
                type_checker.report(
                    ErrorImpl::BadDereference {
                        found: operand_type.to_string(),
                    },
                    &expr.span.start,
                );
                DataType::Error
            }
        },
    };

    Ok(data_type)
}

fn type_check_assign(
    type_checker: &mut TypeChecker,
    expr: &Expr,
    target: &Expr,
    source: &Expr,
) -> Result<DataType, TypeCheckFault> {
    let target_type = type_checker.node_type(target.id)?;
    let source_type = type_checker.node_type(source.id)?;

    if target_type.is_error() || source_type.is_error() {
        return Ok(DataType::Error);
    }

    if target_type.is_function() || source_type.is_function() {
        type_checker.report(ErrorImpl::BadAssignOperand, &expr.span.start);
        return Ok(DataType::Error);
    }

    if target_type != source_type {
        type_checker.report(
            ErrorImpl::BadAssignOperator {
                expected: target_type.to_string(),
                received: source_type.to_string(),
            },
            &expr.span.start,
        );
        return Ok(DataType::Error);
    }

    Ok(target_type)
}

fn type_check_call(type_checker: &mut TypeChecker, call: &CallExpr) -> Result<DataType, TypeCheckFault> {
    type_check_identifier(type_checker, &call.callee)?;

    let mut arg_types = Vec::with_capacity(call.args.exprs.len());
    for arg in &call.args.exprs {
        type_check_expr(type_checker, arg)?;
        arg_types.push(type_checker.node_type(arg.id)?);
    }
    type_checker.annotate(call.args.id, DataType::Tuple(arg_types.clone()));

    let callee_type = type_checker.node_type(call.callee.id)?;
    let (params, ret) = match callee_type {
        DataType::Error => return Ok(DataType::Error),
        DataType::Function { params, ret } => (params, ret),
        other => {
            type_checker.report(
                ErrorImpl::BadCallee {
                    found: other.to_string(),
                },
                &call.callee.span.start,
            );
            return Ok(DataType::Error);
        }
    };

    if params.len() != arg_types.len() {
        type_checker.report(
            ErrorImpl::BadArgumentCount {
                expected: params.len(),
                received: arg_types.len(),
            },
            &call.callee.span.start,
        );
        return Ok(DataType::Error);
    }

    let mut valid = true;
    let mut reported = false;
    for ((param, arg_type), arg) in params.iter().zip(&arg_types).zip(&call.args.exprs) {
        if arg_type.is_error() {
            valid = false;
        } else if arg_type != param {
            if !reported {
                type_checker.report(
                    ErrorImpl::BadArgumentType {
                        expected: param.to_string(),
                        received: arg_type.to_string(),
                    },
                    &arg.span.start,
                );
                reported = true;
            }
            valid = false;
        }
    }

    Ok(poisoned_or(valid, *ret))
}

pub fn type_check_list(
    type_checker: &mut TypeChecker,
    list: &StmtList,
    ret: &DataType,
) -> Result<(), TypeCheckFault> {
    let mut valid = true;

    for stmt in list.iter() {
        type_check_stmt(type_checker, stmt, ret)?;
        if type_checker.node_type(stmt.id)?.is_error() {
            valid = false;
        }
    }

    type_checker.annotate(list.id, poisoned_or(valid, DataType::Void));
    Ok(())
}

fn type_check_var_decl(type_checker: &mut TypeChecker, decl: &VarDecl) -> Result<DataType, TypeCheckFault> {
    type_check_identifier(type_checker, &decl.name)?;
    let data_type = type_checker.node_type(decl.name.id)?;
    type_checker.annotate(decl.id, data_type.clone());

    Ok(data_type)
}

fn type_check_fn_decl(type_checker: &mut TypeChecker, decl: &FnDecl) -> Result<DataType, TypeCheckFault> {
    type_check_identifier(type_checker, &decl.name)?;
    for formal in &decl.formals {
        type_check_var_decl(type_checker, formal)?;
    }

    let ret = decl.return_type.to_data_type();
    type_check_list(type_checker, &decl.body.stmts, &ret)?;

    let valid = !type_checker.node_type(decl.body.stmts.id)?.is_error();
    type_checker.annotate(decl.body.id, poisoned_or(valid, DataType::Void));

    Ok(poisoned_or(valid, DataType::Void))
}

// `Error` when the checked expression is, `Void` otherwise.
fn type_check_expr_stmt(type_checker: &mut TypeChecker, expr: &Expr) -> Result<DataType, TypeCheckFault> {
    type_check_expr(type_checker, expr)?;
    let valid = !type_checker.node_type(expr.id)?.is_error();

    Ok(poisoned_or(valid, DataType::Void))
}

fn type_check_step(type_checker: &mut TypeChecker, operand: &Expr) -> Result<DataType, TypeCheckFault> {
    type_check_expr(type_checker, operand)?;
    let operand_type = type_checker.node_type(operand.id)?;

    if operand_type.is_error() {
        return Ok(DataType::Error);
    }
    if !(operand_type.is_int() || operand_type.is_ptr()) {
        type_checker.report(
            ErrorImpl::BadMathOperand {
                found: operand_type.to_string(),
            },
            &operand.span.start,
        );
        return Ok(DataType::Error);
    }

    Ok(operand_type)
}

fn type_check_condition(type_checker: &mut TypeChecker, condition: &Expr) -> Result<bool, TypeCheckFault> {
    type_check_expr(type_checker, condition)?;
    let condition_type = type_checker.node_type(condition.id)?;

    // Reported even for an `Error` condition
    if !condition_type.is_bool() {
        type_checker.report(
            ErrorImpl::BadCondition {
                found: condition_type.to_string(),
            },
            &condition.span.start,
        );
        return Ok(false);
    }

    Ok(true)
}

fn type_check_return(
    type_checker: &mut TypeChecker,
    stmt: &Stmt,
    value: Option<&Expr>,
    ret: &DataType,
) -> Result<DataType, TypeCheckFault> {
    let value = match value {
        Some(value) => value,
        None if ret.is_void() => return Ok(DataType::Void),
        None => {
            type_checker.report(
                ErrorImpl::MissingReturnValue {
                    expected: ret.to_string(),
                },
                &stmt.span.start,
            );
            return Ok(DataType::Error);
        }
    };

    type_check_expr(type_checker, value)?;
    let value_type = type_checker.node_type(value.id)?;

    if value_type.is_error() {
        return Ok(DataType::Error);
    }

    if ret.is_void() {
        if !value_type.is_void() {
            type_checker.report(ErrorImpl::ExtraReturnValue, &value.span.start);
            return Ok(DataType::Error);
        }
    } else if value_type != *ret {
        type_checker.report(
            ErrorImpl::BadReturnValue {
                expected: ret.to_string(),
                received: value_type.to_string(),
            },
            &value.span.start,
        );
        return Ok(DataType::Error);
    }

    Ok(DataType::Void)
}

pub fn type_check_stmt(
    type_checker: &mut TypeChecker,
    stmt: &Stmt,
    ret: &DataType,
) -> Result<(), TypeCheckFault> {
    let data_type = match &stmt.kind {
        StmtKind::VarDecl(decl) => type_check_var_decl(type_checker, decl)?,
        StmtKind::FnDecl(decl) => type_check_fn_decl(type_checker, decl)?,
        StmtKind::Assign(expr) | StmtKind::Call(expr) | StmtKind::Expr(expr) => {
            type_check_expr_stmt(type_checker, expr)?
        }
        StmtKind::PostInc(operand) | StmtKind::PostDec(operand) => {
            type_check_step(type_checker, operand)?
        }
        StmtKind::Read(target) => {
            type_check_expr(type_checker, target)?;
            let target_type = type_checker.node_type(target.id)?;

            if target_type.is_error() {
                DataType::Error
            } else if target_type.is_function() {
                type_checker.report(ErrorImpl::ReadIntoFunction, &stmt.span.start);
                DataType::Error
            } else if target_type.is_ptr() {
                type_checker.report(ErrorImpl::BadPointerRead, &stmt.span.start);
                DataType::Error
            } else {
                DataType::Void
            }
        }
        StmtKind::Write(value) => {
            type_check_expr(type_checker, value)?;
            let value_type = type_checker.node_type(value.id)?;

            if value_type.is_error() {
                DataType::Error
            } else if value_type.is_function() {
                type_checker.report(ErrorImpl::WriteFromFunction, &stmt.span.start);
                DataType::Error
            } else if value_type.is_void() {
                type_checker.report(ErrorImpl::BadWriteOfVoid, &stmt.span.start);
                DataType::Error
            } else {
                DataType::Void
            }
        }
        StmtKind::If { condition, body } | StmtKind::While { condition, body } => {
            let condition_valid = type_check_condition(type_checker, condition)?;
            type_check_list(type_checker, body, ret)?;
            let body_valid = !type_checker.node_type(body.id)?.is_error();

            poisoned_or(condition_valid && body_valid, DataType::Void)
        }
        StmtKind::IfElse {
            condition,
            then_body,
            else_body,
        } => {
            let condition_valid = type_check_condition(type_checker, condition)?;
            type_check_list(type_checker, then_body, ret)?;
            type_check_list(type_checker, else_body, ret)?;
            let then_valid = !type_checker.node_type(then_body.id)?.is_error();
            let else_valid = !type_checker.node_type(else_body.id)?.is_error();

            poisoned_or(condition_valid && then_valid && else_valid, DataType::Void)
        }
        StmtKind::Return(value) => type_check_return(type_checker, stmt, value.as_ref(), ret)?,
    };

    type_checker.annotate(stmt.id, data_type);
    Ok(())
}

/// Type checks a whole program.
///
/// Walks every node once, post-order and left to right, so annotations and
/// the order of diagnostics are deterministic. Ill-typed code never stops the
/// walk; only a fault in the pass does.
pub fn type_check(program: &Program, symbols: &SymbolTable) -> Result<TypeCheckResult, TypeCheckFault> {
    let mut type_checker = TypeChecker::new(symbols, program.node_count);

    // Top-level returns are checked against `void`
    type_check_list(&mut type_checker, &program.decls, &DataType::Void)?;

    let valid = !type_checker.node_type(program.decls.id)?.is_error();
    type_checker.annotate(program.id, poisoned_or(valid, DataType::Void));

    let success = !type_checker.diagnostics.failed();
    debug!(
        annotated = type_checker.annotations.len(),
        diagnostics = type_checker.diagnostics.len(),
        success,
        "type checked program"
    );

    Ok(TypeCheckResult {
        annotations: type_checker.annotations,
        diagnostics: type_checker.diagnostics.into_errors(),
        success,
    })
}
