//! Front-end pipeline: tokenize, parse, resolve, type check.

use std::rc::Rc;

use thiserror::Error as ThisError;
use tracing::{debug, info};

use crate::{
    ast::ast::Program,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    resolver::{resolver::resolve, symbols::SymbolTable},
    type_checker::{
        diagnostics::TypeCheckFault,
        type_checker::{type_check, TypeCheckResult},
    },
};

/// A stage before type checking rejected the input, or the type checker
/// itself faulted.
#[derive(ThisError, Debug)]
pub enum FrontEndError {
    #[error("lexing failed: {}", .0.kind())]
    Lex(Error),
    #[error("parsing failed: {}", .0.kind())]
    Parse(Error),
    #[error("name resolution failed with {} error(s)", .0.len())]
    Resolve(Vec<Error>),
    #[error("internal type checker fault: {0}")]
    Fault(#[from] TypeCheckFault),
}

impl FrontEndError {
    /// User-facing errors carried by this failure, in source order.
    pub fn errors(&self) -> Vec<&Error> {
        match self {
            FrontEndError::Lex(error) | FrontEndError::Parse(error) => vec![error],
            FrontEndError::Resolve(errors) => errors.iter().collect(),
            FrontEndError::Fault(_) => vec![],
        }
    }
}

/// Everything the front end produced for one source file.
#[derive(Debug)]
pub struct Checked {
    pub program: Program,
    pub symbols: SymbolTable,
    pub result: TypeCheckResult,
}

impl Checked {
    pub fn success(&self) -> bool {
        self.result.success
    }
}

/// Runs the whole front end over `source`.
///
/// Type errors do not make this fail: they are reported in
/// `Checked::result`. Only lexing, parsing and resolution errors, or a fault
/// in the type checker, return `Err`.
pub fn check_source(source: &str, file_name: &str) -> Result<Checked, FrontEndError> {
    let tokens = tokenize(source.to_string(), Some(file_name.to_string())).map_err(FrontEndError::Lex)?;
    debug!(tokens = tokens.len(), "tokenized");

    let program = parse(tokens, Rc::new(file_name.to_string())).map_err(FrontEndError::Parse)?;
    let symbols = resolve(&program).map_err(FrontEndError::Resolve)?;
    let result = type_check(&program, &symbols)?;

    info!(
        file = file_name,
        nodes = program.node_count,
        diagnostics = result.diagnostics.len(),
        success = result.success,
        "checked source"
    );

    Ok(Checked {
        program,
        symbols,
        result,
    })
}
