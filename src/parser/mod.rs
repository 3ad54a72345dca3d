//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Declarations (variables, pointers, functions with formals)
//! - Statements (read, write, increments, if, if-else, while, return)
//! - Expression parsing (binary and unary ops, calls, assignment, literals)
//! - Type parsing for declaration types
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. Every
//! node it builds receives a fresh `NodeId`.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
