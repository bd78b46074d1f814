//! Semantic types and the type registry.
//!
//! This module contains the `Type` values the analyzer computes for every
//! expression and the registry that maps type names to them:
//!
//! - Primitive, pointer, array, struct and function types
//! - Type equality as used by every compatibility check
//! - The registry of named types, pre-seeded with the primitives
//! - Construction of types from parsed annotations

pub mod registry;
pub mod types;
