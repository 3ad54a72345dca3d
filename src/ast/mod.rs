/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node ids, the program root and statement lists
/// - expressions: Definitions for the expression kinds
/// - statements: Definitions for the statement and declaration kinds
/// - types: Type syntax and the `DataType` representation used by analysis
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
