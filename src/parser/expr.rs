use crate::{
    ast::expressions::{BinaryOp, CallExpr, Expr, ExprKind, ExprList, Identifier, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led_fn = match parser.get_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => return Err(parser.unexpected()),
        };
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Identifier, Error> {
    let error = parser.unexpected_detailed("expected identifier");
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(Identifier {
        id: parser.advance_id(),
        name: token.value,
        span: token.span,
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let kind = match parser.current_token_kind() {
        TokenKind::Number => {
            let value = parser.current_token().value.parse::<i32>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: parser.current_token().value.clone(),
                    },
                    parser.get_position(),
                )
            })?;
            parser.advance();
            ExprKind::IntLit(value)
        }
        TokenKind::True => {
            parser.advance();
            ExprKind::True
        }
        TokenKind::False => {
            parser.advance();
            ExprKind::False
        }
        TokenKind::Identifier => {
            let identifier = parse_identifier(parser)?;
            return Ok(Expr {
                id: parser.advance_id(),
                span: identifier.span.clone(),
                kind: ExprKind::Identifier(identifier),
            });
        }
        _ => return Err(parser.unexpected()),
    };

    let span = parser.span_from(parser.previous_start());
    Ok(Expr {
        id: parser.advance_id(),
        kind,
        span,
    })
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOp> {
    let operator = match kind {
        TokenKind::Plus => BinaryOp::Plus,
        TokenKind::Dash => BinaryOp::Minus,
        TokenKind::Star => BinaryOp::Times,
        TokenKind::Slash => BinaryOp::Divide,
        TokenKind::And => BinaryOp::And,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::Equals => BinaryOp::Equals,
        TokenKind::NotEquals => BinaryOp::NotEquals,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::LessEquals => BinaryOp::LessEq,
        TokenKind::GreaterEquals => BinaryOp::GreaterEq,
        _ => return None,
    };
    Some(operator)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator = match binary_operator(parser.current_token_kind()) {
        Some(operator) => operator,
        None => return Err(parser.unexpected()),
    };
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: Span {
            start: left.span.start.clone(),
            end: right.span.end.clone(),
        },
        kind: ExprKind::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        },
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = match parser.current_token_kind() {
        TokenKind::Dash => UnaryOp::Neg,
        TokenKind::Not => UnaryOp::Not,
        TokenKind::Star => UnaryOp::Deref,
        _ => return Err(parser.unexpected()),
    };
    let operator_token = parser.advance();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: Span {
            start: operator_token.span.start,
            end: operand.span.end.clone(),
        },
        kind: ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
    })
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    if !left.is_location() {
        return Err(parser.unexpected_detailed("left side of assignment is not assignable"));
    }
    parser.advance();

    // Right associative: `a = b = c` is `a = (b = c)`
    let source = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: Span {
            start: left.span.start.clone(),
            end: source.span.end.clone(),
        },
        kind: ExprKind::Assign {
            target: Box::new(left),
            source: Box::new(source),
        },
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    // The callee's wrapping expression node becomes the call node
    let id = left.id;
    let callee = match left.kind {
        ExprKind::Identifier(identifier) => identifier,
        _ => return Err(parser.unexpected_detailed("only named functions can be called")),
    };

    let args_start = parser.expect(TokenKind::OpenParen)?.span.start;
    let mut exprs = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            exprs.push(parse_expr(parser, BindingPower::Default)?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let args = ExprList {
        id: parser.advance_id(),
        exprs,
        span: parser.span_from(args_start),
    };

    Ok(Expr {
        id,
        span: parser.span_from(left.span.start),
        kind: ExprKind::Call(CallExpr { callee, args }),
    })
}
