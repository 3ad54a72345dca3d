use crate::{
    ast::{
        ast::{FnBody, StmtList},
        expressions::ExprKind,
        statements::{FnDecl, Stmt, StmtKind, VarDecl},
        types::TypeSpec,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, parse_identifier},
        lookups::BindingPower,
    },
};

use super::{parser::Parser, types::parse_type};

/// Parses one top-level item: a variable or function declaration, or any
/// statement.
pub fn parse_item(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.current_token_kind().is_type_keyword() {
        return parse_decl_stmt(parser, true);
    }

    parse_stmt(parser)
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token_kind = parser.current_token_kind();

    if token_kind.is_type_keyword() {
        return parse_decl_stmt(parser, false);
    }

    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&token_kind) {
        let stmt_fn = *stmt_fn;
        return stmt_fn(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let kind = match parser.current_token_kind() {
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            if !expr.is_location() {
                return Err(parser.unexpected_detailed("operand of increment or decrement is not assignable"));
            }
            match parser.advance().kind {
                TokenKind::PlusPlus => StmtKind::PostInc(expr),
                _ => StmtKind::PostDec(expr),
            }
        }
        _ => match expr.kind {
            ExprKind::Assign { .. } => StmtKind::Assign(expr),
            ExprKind::Call(_) => StmtKind::Call(expr),
            _ => StmtKind::Expr(expr),
        },
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        kind,
        span: parser.span_from(start),
    })
}

/// `type name;` or, when `allow_functions` is set, `type name(formals) { body }`.
pub fn parse_decl_stmt(parser: &mut Parser, allow_functions: bool) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let type_spec = parse_type(parser, BindingPower::Default)?;
    let name = parse_identifier(parser)?;

    let kind = if parser.current_token_kind() == TokenKind::OpenParen {
        if !allow_functions {
            return Err(parser.unexpected_detailed("functions can only be declared at the top level"));
        }
        StmtKind::FnDecl(parse_fn_decl(parser, type_spec, name)?)
    } else {
        parser.expect(TokenKind::Semicolon)?;
        StmtKind::VarDecl(VarDecl {
            id: parser.advance_id(),
            span: parser.span_from(start.clone()),
            type_spec,
            name,
        })
    };

    Ok(Stmt {
        id: parser.advance_id(),
        kind,
        span: parser.span_from(start),
    })
}

fn parse_formal(parser: &mut Parser) -> Result<VarDecl, Error> {
    let start = parser.get_position();
    let type_spec = parse_type(parser, BindingPower::Default)?;
    let name = parse_identifier(parser)?;

    Ok(VarDecl {
        id: parser.advance_id(),
        span: parser.span_from(start),
        type_spec,
        name,
    })
}

fn parse_fn_decl(
    parser: &mut Parser,
    return_type: TypeSpec,
    name: crate::ast::expressions::Identifier,
) -> Result<FnDecl, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut formals = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            formals.push(parse_formal(parser)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let body_start = parser.get_position();
    let stmts = parse_block(parser)?;
    let body = FnBody {
        id: parser.advance_id(),
        span: parser.span_from(body_start),
        stmts,
    };

    Ok(FnDecl {
        return_type,
        name,
        formals,
        body,
    })
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<StmtList, Error> {
    let start = parser.get_position();
    parser.expect(TokenKind::OpenCurly)?;

    let mut stmts = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        stmts.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(StmtList {
        id: parser.advance_id(),
        stmts,
        span: parser.span_from(start),
    })
}

fn parse_condition(parser: &mut Parser) -> Result<crate::ast::expressions::Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let target = parse_expr(parser, BindingPower::Default)?;
    if !target.is_location() {
        return Err(parser.unexpected_detailed("read target is not assignable"));
    }
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        kind: StmtKind::Read(target),
        span: parser.span_from(start),
    })
}

pub fn parse_write_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        kind: StmtKind::Write(value),
        span: parser.span_from(start),
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let condition = parse_condition(parser)?;
    let then_body = parse_block(parser)?;

    let kind = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        let else_body = parse_block(parser)?;
        StmtKind::IfElse {
            condition,
            then_body,
            else_body,
        }
    } else {
        StmtKind::If {
            condition,
            body: then_body,
        }
    };

    Ok(Stmt {
        id: parser.advance_id(),
        kind,
        span: parser.span_from(start),
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt {
        id: parser.advance_id(),
        kind: StmtKind::While { condition, body },
        span: parser.span_from(start),
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        kind: StmtKind::Return(value),
        span: parser.span_from(start),
    })
}
