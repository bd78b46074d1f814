//! Type annotations as they appear in declarations.
//!
//! An annotation is a base type name plus a run of modifiers written in
//! front of it: `*` for a pointer and `[N]` / `[]` for an array. The
//! analyzer resolves annotations into `types::Type` values through the
//! type registry.

use std::fmt::Display;

use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeModifier {
    Pointer,
    Array(Option<usize>),
}

impl Display for TypeModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeModifier::Pointer => write!(f, "*"),
            TypeModifier::Array(Some(length)) => write!(f, "[{}]", length),
            TypeModifier::Array(None) => write!(f, "[]"),
        }
    }
}

/// A parsed type annotation, e.g. `**Point` or `[4]int`.
///
/// `modifiers` is ordered outermost first, so `*[4]int` is a pointer to an
/// array of four ints.
#[derive(Debug, Clone)]
pub struct TypeAnnotation {
    pub name: String,
    pub modifiers: Vec<TypeModifier>,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn named(name: &str, span: Span) -> Self {
        TypeAnnotation {
            name: String::from(name),
            modifiers: vec![],
            span,
        }
    }
}

impl PartialEq for TypeAnnotation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.modifiers == other.modifiers
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for modifier in self.modifiers.iter() {
            write!(f, "{}", modifier)?;
        }
        write!(f, "{}", self.name)
    }
}
