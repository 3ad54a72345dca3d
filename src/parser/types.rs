//! Type parsing implementation.
//!
//! Type annotations are a base keyword (`int`, `bool`, `void`) followed by
//! any number of `*`. Like expressions, they are parsed through NUD/LED
//! tables: the keyword is the NUD and each `*` is a LED adding one level of
//! indirection.

use std::collections::HashMap;

use crate::{
    ast::types::{BaseType, TypeSpec},
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeSpec, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeSpec, BindingPower) -> Result<TypeSpec, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Int, parse_base_type);
    parser.type_nud(TokenKind::Bool, parse_base_type);
    parser.type_nud(TokenKind::Void, parse_base_type);
    parser.type_led(TokenKind::Star, BindingPower::Unary, parse_pointer_type);
}

pub fn parse_base_type(parser: &mut Parser) -> Result<TypeSpec, Error> {
    let base = match parser.current_token_kind() {
        TokenKind::Int => BaseType::Int,
        TokenKind::Bool => BaseType::Bool,
        TokenKind::Void => BaseType::Void,
        _ => return Err(parser.unexpected_detailed("expected a type")),
    };
    let token = parser.advance();

    Ok(TypeSpec {
        base,
        depth: 0,
        span: token.span,
    })
}

pub fn parse_pointer_type(
    parser: &mut Parser,
    left: TypeSpec,
    _bp: BindingPower,
) -> Result<TypeSpec, Error> {
    let star = parser.expect(TokenKind::Star)?;

    Ok(TypeSpec {
        base: left.base,
        depth: left.depth + 1,
        span: Span {
            start: left.span.start,
            end: star.span.end,
        },
    })
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeSpec, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud_fn) => *nud_fn,
        None => return Err(parser.unexpected_detailed("expected a type")),
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led_fn = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led_fn) => *led_fn,
            None => return Err(parser.unexpected()),
        };
        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}
