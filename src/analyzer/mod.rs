//! Semantic analysis of the parsed statement tree.
//!
//! The analyzer walks the tree once, in source order, and checks that:
//!
//! - every name is declared before use and not redeclared in its scope
//! - every expression is well typed, annotating it with its type
//! - declarations and control flow appear only where they are allowed
//!
//! All state lives in an `AnalyzerContext` built fresh for each run.

pub mod analyzer;
pub mod expr;
pub mod stack;
