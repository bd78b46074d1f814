use std::collections::HashMap;

use crate::{
    ast::types::{TypeAnnotation, TypeModifier},
    errors::errors::{Error, ErrorImpl},
};

use super::types::Type;

pub const PRIMITIVE_TYPES: [&str; 6] = ["float", "int", "void", "string", "char", "bool"];

/// Maps type names to types for one compilation.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, Type>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            types: HashMap::new(),
        };

        for name in PRIMITIVE_TYPES {
            registry.register_primitive(name);
        }

        registry
    }

    pub fn register_primitive(&mut self, name: &str) {
        self.types.insert(String::from(name), Type::primitive(name));
    }

    /// Registers a struct type. Callers check for an existing type of the
    /// same name first; registering over one replaces it.
    pub fn register_struct(&mut self, name: &str, fields: Vec<(String, Type)>) {
        self.types.insert(
            String::from(name),
            Type::Struct {
                name: String::from(name),
                fields,
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Wraps the named base type in `pointer_depth` pointers.
    pub fn build_type(&self, base_name: &str, pointer_depth: usize) -> Option<Type> {
        let mut type_ = self.lookup(base_name)?.clone();
        for _ in 0..pointer_depth {
            type_ = Type::pointer(type_);
        }
        Some(type_)
    }

    /// Resolves a parsed annotation, applying its modifiers innermost first.
    pub fn build_annotation(&self, annotation: &TypeAnnotation) -> Result<Type, Error> {
        let mut type_ = self.build_type(&annotation.name, 0).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    type_: annotation.name.clone(),
                },
                annotation.span.start.clone(),
            )
        })?;

        for modifier in annotation.modifiers.iter().rev() {
            type_ = match modifier {
                TypeModifier::Pointer => Type::pointer(type_),
                TypeModifier::Array(length) => Type::array(type_, *length),
            };
        }

        Ok(type_)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
