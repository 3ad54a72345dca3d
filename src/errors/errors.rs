use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether the error was raised by type analysis rather than by the
    /// lexer, parser or name resolution.
    pub fn is_type_error(&self) -> bool {
        !matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::UnexpectedToken { .. }
                | ErrorImpl::UnexpectedTokenDetailed { .. }
                | ErrorImpl::NumberParseError { .. }
                | ErrorImpl::VariableAlreadyDeclared { .. }
                | ErrorImpl::VariableNotDeclared { .. }
                | ErrorImpl::InvalidDeclarationType { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::InvalidDeclarationType { .. } => "InvalidDeclarationType",
            ErrorImpl::BadMathOperand { .. } => "BadMathOperand",
            ErrorImpl::BadMathOperator { .. } => "BadMathOperator",
            ErrorImpl::BadLogicalOperand { .. } => "BadLogicalOperand",
            ErrorImpl::BadRelationalOperand { .. } => "BadRelationalOperand",
            ErrorImpl::BadEqualityOperand { .. } => "BadEqualityOperand",
            ErrorImpl::BadEqualityOperator { .. } => "BadEqualityOperator",
            ErrorImpl::BadDereference { .. } => "BadDereference",
            ErrorImpl::ReadIntoFunction => "ReadIntoFunction",
            ErrorImpl::BadPointerRead => "BadPointerRead",
            ErrorImpl::WriteFromFunction => "WriteFromFunction",
            ErrorImpl::BadWriteOfVoid => "BadWriteOfVoid",
            ErrorImpl::BadCondition { .. } => "BadCondition",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::ExtraReturnValue => "ExtraReturnValue",
            ErrorImpl::BadReturnValue { .. } => "BadReturnValue",
            ErrorImpl::BadCallee { .. } => "BadCallee",
            ErrorImpl::BadArgumentCount { .. } => "BadArgumentCount",
            ErrorImpl::BadArgumentType { .. } => "BadArgumentType",
            ErrorImpl::BadAssignOperand => "BadAssignOperand",
            ErrorImpl::BadAssignOperator { .. } => "BadAssignOperator",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::InvalidDeclarationType { variable } => {
                ErrorTip::Suggestion(format!("`{}` cannot be declared with type `void`", variable))
            }
            ErrorImpl::BadMathOperand { found } => ErrorTip::Suggestion(format!(
                "Arithmetic operands must be int or pointer, found `{}`",
                found
            )),
            ErrorImpl::BadMathOperator { operator, operands } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to {}",
                operator, operands
            )),
            ErrorImpl::BadLogicalOperand { found } => ErrorTip::Suggestion(format!(
                "Logical operands must be bool, found `{}`",
                found
            )),
            ErrorImpl::BadRelationalOperand { found } => ErrorTip::Suggestion(format!(
                "Relational operands must be int, found `{}`",
                found
            )),
            ErrorImpl::BadEqualityOperand { found } => ErrorTip::Suggestion(format!(
                "`{}` values cannot be compared for equality",
                found
            )),
            ErrorImpl::BadEqualityOperator { left, right } => ErrorTip::Suggestion(format!(
                "Cannot compare `{}` with `{}`",
                left, right
            )),
            ErrorImpl::BadDereference { found } => {
                ErrorTip::Suggestion(format!("Cannot dereference a value of type `{}`", found))
            }
            ErrorImpl::ReadIntoFunction => {
                ErrorTip::Suggestion(String::from("Attempt to read into a function"))
            }
            ErrorImpl::BadPointerRead => {
                ErrorTip::Suggestion(String::from("Attempt to read a raw pointer"))
            }
            ErrorImpl::WriteFromFunction => {
                ErrorTip::Suggestion(String::from("Attempt to write a function"))
            }
            ErrorImpl::BadWriteOfVoid => ErrorTip::Suggestion(String::from("Attempt to write void")),
            ErrorImpl::BadCondition { found } => ErrorTip::Suggestion(format!(
                "Conditions must be bool, found `{}`",
                found
            )),
            ErrorImpl::MissingReturnValue { expected } => ErrorTip::Suggestion(format!(
                "Missing return value of type `{}`",
                expected
            )),
            ErrorImpl::ExtraReturnValue => {
                ErrorTip::Suggestion(String::from("Return with a value in a void function"))
            }
            ErrorImpl::BadReturnValue { expected, received } => ErrorTip::Suggestion(format!(
                "Expected return type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::BadCallee { found } => ErrorTip::Suggestion(format!(
                "Attempt to call a non-function of type `{}`",
                found
            )),
            ErrorImpl::BadArgumentCount { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::BadArgumentType { expected, received } => ErrorTip::Suggestion(format!(
                "Expected argument type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::BadAssignOperand => {
                ErrorTip::Suggestion(String::from("Functions cannot be assigned or assigned to"))
            }
            ErrorImpl::BadAssignOperator { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    // Lexing and parsing
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Name resolution
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("invalid type in declaration of {variable:?}")]
    InvalidDeclarationType { variable: String },

    // Type analysis
    #[error("arithmetic operator applied to invalid operand of type {found}")]
    BadMathOperand { found: String },
    #[error("arithmetic operator {operator} applied to incompatible operands {operands}")]
    BadMathOperator { operator: String, operands: String },
    #[error("logical operator applied to non-bool operand of type {found}")]
    BadLogicalOperand { found: String },
    #[error("relational operator applied to non-numeric operand of type {found}")]
    BadRelationalOperand { found: String },
    #[error("invalid equality operand of type {found}")]
    BadEqualityOperand { found: String },
    #[error("invalid equality operation between {left} and {right}")]
    BadEqualityOperator { left: String, right: String },
    #[error("invalid pointer dereference of type {found}")]
    BadDereference { found: String },
    #[error("attempt to read into a function")]
    ReadIntoFunction,
    #[error("attempt to read a raw pointer")]
    BadPointerRead,
    #[error("attempt to write a function")]
    WriteFromFunction,
    #[error("attempt to write void")]
    BadWriteOfVoid,
    #[error("non-bool expression of type {found} used as a condition")]
    BadCondition { found: String },
    #[error("missing return value of type {expected}")]
    MissingReturnValue { expected: String },
    #[error("return with a value in a void function")]
    ExtraReturnValue,
    #[error("bad return value: expected {expected}, received {received}")]
    BadReturnValue { expected: String, received: String },
    #[error("attempt to call a non-function of type {found}")]
    BadCallee { found: String },
    #[error("function call with wrong number of args: expected {expected}, received {received}")]
    BadArgumentCount { expected: usize, received: usize },
    #[error("type of actual does not match type of formal: expected {expected}, received {received}")]
    BadArgumentType { expected: String, received: String },
    #[error("invalid assignment operand")]
    BadAssignOperand,
    #[error("invalid assignment operation: expected {expected}, received {received}")]
    BadAssignOperator { expected: String, received: String },
}
