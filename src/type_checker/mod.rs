//! Type checking.
//!
//! Assigns a `DataType` to every node of a resolved program and reports each
//! ill-typed construct, continuing past errors so one run finds all of them.
//!
//! - `annotations` holds the node-to-type map
//! - `diagnostics` collects located errors and the pass/fail flag
//! - `type_checker` holds the per-construct rules and the `type_check` entry
//!
//! `Error` is infectious: a construct with an `Error` child becomes `Error`
//! without repeating the child's diagnostic. Checks that stand on their own,
//! like a non-bool condition, still fire.

pub mod annotations;
pub mod diagnostics;
pub mod type_checker;
