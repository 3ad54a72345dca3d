//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the front end. It
//! includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing, name resolution and
//!   type analysis
//! - Helpful error messages and suggestions for the renderer

pub mod errors;
