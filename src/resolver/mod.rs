//! Name resolution.
//!
//! Binds every identifier node, uses and declaration names alike, to the
//! symbol it refers to. Symbols carry the fixed `DataType` of what they
//! name, which is all the type checker needs to know about them.

pub mod resolver;
pub mod symbols;
