//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! This module transforms a stream of tokens into a statement tree. It uses
//! a Pratt parser for expressions and recursive descent for statements:
//!
//! - Statement parsing (declarations, blocks, control flow)
//! - Expression parsing (binary and prefix operators, calls, literals)
//! - Type annotation parsing (`*`, `[N]` and `[]` modifiers)
//!
//! Expression parsing is driven by NUD (null denotation) and LED (left
//! denotation) handler tables, with binding powers deciding precedence.
//! Parsing stops at the first error; no partial tree is returned.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
