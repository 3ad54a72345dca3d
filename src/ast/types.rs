//! Type system definitions.
//!
//! This module defines both halves of the type system:
//!
//! - `TypeSpec`, the type syntax written in declarations (`int`, `bool**`)
//! - `DataType`, the closed set of types the analysis assigns to nodes
//!
//! `Void`, `Int`, `Bool` and `Error` are unit variants, so every occurrence is
//! the same value. Pointers, functions and tuples are built fresh where they
//! are needed and compared structurally.

use std::fmt::Display;

use crate::Span;

/// Scalar kinds a pointer can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Void,
    Int,
    Bool,
}

impl Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BaseType::Void => write!(f, "void"),
            BaseType::Int => write!(f, "int"),
            BaseType::Bool => write!(f, "bool"),
        }
    }
}

/// Type annotation as written in the source: a base keyword followed by
/// `depth` stars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub base: BaseType,
    pub depth: u32,
    pub span: Span,
}

impl TypeSpec {
    pub fn to_data_type(&self) -> DataType {
        DataType::pointer(self.base, self.depth)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Void,
    Int,
    Bool,
    /// `depth` levels of indirection to `base`. Always at least 1 when built
    /// through `DataType::pointer`.
    Pointer { base: BaseType, depth: u32 },
    Function { params: Vec<DataType>, ret: Box<DataType> },
    /// Actual argument types of a call, matched against `Function::params`.
    Tuple(Vec<DataType>),
    Error,
}

impl DataType {
    pub fn scalar(base: BaseType) -> DataType {
        match base {
            BaseType::Void => DataType::Void,
            BaseType::Int => DataType::Int,
            BaseType::Bool => DataType::Bool,
        }
    }

    /// Builds a pointer type. A depth of 0 yields the bare scalar.
    pub fn pointer(base: BaseType, depth: u32) -> DataType {
        if depth == 0 {
            DataType::scalar(base)
        } else {
            DataType::Pointer { base, depth }
        }
    }

    pub fn function(params: Vec<DataType>, ret: DataType) -> DataType {
        DataType::Function {
            params,
            ret: Box::new(ret),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, DataType::Int)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, DataType::Bool)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, DataType::Void)
    }

    pub fn is_ptr(&self) -> bool {
        matches!(self, DataType::Pointer { .. })
    }

    pub fn is_function(&self) -> bool {
        matches!(self, DataType::Function { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DataType::Error)
    }

    /// Value ("var") kinds: the types a variable can hold and compare.
    pub fn is_var(&self) -> bool {
        matches!(self, DataType::Int | DataType::Bool | DataType::Pointer { .. })
    }

    /// Indirection depth. Scalars have depth 0.
    pub fn depth(&self) -> u32 {
        match self {
            DataType::Pointer { depth, .. } => *depth,
            _ => 0,
        }
    }

    /// Strips one level of indirection.
    ///
    /// Returns `None` when there is nothing to dereference: any non-pointer,
    /// and a pointer of depth 0.
    pub fn deref(&self) -> Option<DataType> {
        match self {
            DataType::Pointer { depth: 0, .. } => None,
            DataType::Pointer { base, depth } => Some(DataType::pointer(*base, depth - 1)),
            _ => None,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Void => write!(f, "void"),
            DataType::Int => write!(f, "int"),
            DataType::Bool => write!(f, "bool"),
            DataType::Pointer { base, depth } => {
                write!(f, "{}{}", base, "*".repeat(*depth as usize))
            }
            DataType::Function { params, ret } => {
                let params = params.iter().map(|p| p.to_string()).collect::<Vec<String>>();
                write!(f, "fn({}) -> {}", params.join(", "), ret)
            }
            DataType::Tuple(elts) => {
                let elts = elts.iter().map(|e| e.to_string()).collect::<Vec<String>>();
                write!(f, "({})", elts.join(", "))
            }
            DataType::Error => write!(f, "<error>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BaseType, DataType};

    #[test]
    fn test_pointer_constructor_folds_depth_zero() {
        assert_eq!(DataType::pointer(BaseType::Int, 0), DataType::Int);
        assert_eq!(DataType::pointer(BaseType::Bool, 0), DataType::Bool);
        assert_eq!(
            DataType::pointer(BaseType::Int, 2),
            DataType::Pointer { base: BaseType::Int, depth: 2 }
        );
    }

    #[test]
    fn test_deref_strips_one_level() {
        let ptr2 = DataType::pointer(BaseType::Int, 2);
        let ptr1 = ptr2.deref().unwrap();

        assert_eq!(ptr1, DataType::pointer(BaseType::Int, 1));
        assert_eq!(ptr1.deref(), Some(DataType::Int));
        assert_eq!(DataType::Int.deref(), None);
    }

    #[test]
    fn test_deref_fails_on_depth_zero_and_non_pointers() {
        let degenerate = DataType::Pointer { base: BaseType::Int, depth: 0 };

        assert_eq!(degenerate.deref(), None);
        assert_eq!(DataType::Bool.deref(), None);
        assert_eq!(DataType::Error.deref(), None);
        assert_eq!(DataType::function(vec![], DataType::Void).deref(), None);
    }

    #[test]
    fn test_pointer_equality_needs_base_and_depth() {
        let int1 = DataType::pointer(BaseType::Int, 1);

        assert_eq!(int1, DataType::pointer(BaseType::Int, 1));
        assert_ne!(int1, DataType::pointer(BaseType::Int, 2));
        assert_ne!(int1, DataType::pointer(BaseType::Bool, 1));
        assert_ne!(int1, DataType::Int);
    }

    #[test]
    fn test_function_equality_is_structural() {
        let f = DataType::function(vec![DataType::Int, DataType::Bool], DataType::Void);

        assert_eq!(f, DataType::function(vec![DataType::Int, DataType::Bool], DataType::Void));
        assert_ne!(f, DataType::function(vec![DataType::Bool, DataType::Int], DataType::Void));
        assert_ne!(f, DataType::function(vec![DataType::Int, DataType::Bool], DataType::Int));
        assert_ne!(f, DataType::Tuple(vec![DataType::Int, DataType::Bool]));
    }

    #[test]
    fn test_predicates() {
        let ptr = DataType::pointer(BaseType::Bool, 1);

        assert!(DataType::Int.is_int() && DataType::Int.is_var());
        assert!(DataType::Bool.is_bool() && DataType::Bool.is_var());
        assert!(DataType::Void.is_void() && !DataType::Void.is_var());
        assert!(ptr.is_ptr() && ptr.is_var());
        assert!(DataType::Error.is_error() && !DataType::Error.is_var());

        let f = DataType::function(vec![], DataType::Int);
        assert!(f.is_function() && !f.is_var());
        assert!(!DataType::Tuple(vec![]).is_var());
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::pointer(BaseType::Int, 2).to_string(), "int**");
        assert_eq!(
            DataType::function(vec![DataType::Int, DataType::pointer(BaseType::Bool, 1)], DataType::Void)
                .to_string(),
            "fn(int, bool*) -> void"
        );
        assert_eq!(DataType::Tuple(vec![DataType::Int, DataType::Bool]).to_string(), "(int, bool)");
        assert_eq!(DataType::Error.to_string(), "<error>");
    }
}
