/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: expression nodes, operators and their fully parenthesized rendering
/// - statements: statement and declaration nodes
/// - types: type annotations as written in the source
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
