//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Expressions use a Pratt parser with NUD/LED handlers; statements and
//! declarations use dedicated functions dispatched on their first token.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers

use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{
        ast::{NodeId, Program, StmtList},
        statements::Stmt,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_item,
    types::{
        create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler,
        TypeNUDLookup,
    },
};

/// The main parser structure that maintains parsing state.
///
/// Holds the token stream, the lookup tables, and the counter that hands out
/// dense `NodeId`s to every node built.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: TypeBPLookup,
    /// Next node id to hand out
    current_id: u32,
}

impl Parser {
    /// Creates a new Parser instance with empty lookup tables.
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
            current_id: 0,
        }
    }

    /// Returns the current token without advancing.
    ///
    /// Past the end of the stream this keeps returning the final `EOF` token.
    pub fn current_token(&self) -> &Token {
        let index = self.pos.min(self.tokens.len().saturating_sub(1));
        &self.tokens[index]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        if self.tokens.is_empty() {
            TokenKind::EOF
        } else {
            self.current_token().kind
        }
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected()),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Error for the current token being unexpected.
    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    /// Error for the current token with an explanation.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    pub fn get_type_bp_lookup(&self) -> &TypeBPLookup {
        &self.type_binding_power_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers do not carry a binding power, so a token can be both
    /// prefix and infix (`-`, `*`) without one registration clobbering the
    /// other.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Hands out the next node id.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }

    /// Start position of the current token.
    pub fn get_position(&self) -> Position {
        if self.tokens.is_empty() {
            Position(0, Rc::clone(&self.file))
        } else {
            self.current_token().span.start.clone()
        }
    }

    /// Start position of the most recently consumed token.
    pub fn previous_start(&self) -> Position {
        if self.pos == 0 || self.tokens.is_empty() {
            Position(0, Rc::clone(&self.file))
        } else {
            self.tokens[self.pos - 1].span.start.clone()
        }
    }

    /// End position of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        if self.pos == 0 || self.tokens.is_empty() {
            Position(0, Rc::clone(&self.file))
        } else {
            self.tokens[self.pos - 1].span.end.clone()
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end(),
        }
    }
}

/// Parses a stream of tokens into a `Program`.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses top-level items until EOF.
/// Parsing stops at the first syntax error.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, Rc::clone(&file));
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let start = Position(0, Rc::clone(&file));
    let mut body: Vec<Stmt> = vec![];

    while parser.has_tokens() {
        body.push(parse_item(&mut parser)?);
    }

    let span = parser.span_from(start);
    let decls = StmtList {
        id: parser.advance_id(),
        stmts: body,
        span: span.clone(),
    };
    let id = parser.advance_id();

    debug!(items = decls.len(), nodes = parser.current_id, "parsed program");

    Ok(Program {
        id,
        decls,
        span,
        node_count: parser.current_id,
    })
}
