use std::fmt::Display;

/// A semantic type. Types are immutable values; pointer depth is expressed
/// by nesting, so `**int` is `Pointer(Pointer(int))`.
#[derive(Debug, Clone)]
pub enum Type {
    Primitive(String),
    Pointer(Box<Type>),
    Array(Box<Type>, Option<usize>),
    Struct {
        name: String,
        /// Declaration order is layout order.
        fields: Vec<(String, Type)>,
    },
    Function {
        return_type: Box<Type>,
        parameters: Vec<Type>,
    },
}

impl Type {
    pub fn primitive(name: &str) -> Self {
        Type::Primitive(String::from(name))
    }

    pub fn pointer(sub: Type) -> Self {
        Type::Pointer(Box::new(sub))
    }

    pub fn array(sub: Type, length: Option<usize>) -> Self {
        Type::Array(Box::new(sub), length)
    }

    pub fn is_primitive(&self, name: &str) -> bool {
        matches!(self, Type::Primitive(primitive) if primitive == name)
    }

    /// Whether this is one of the named primitives.
    pub fn is_one_of(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.is_primitive(name))
    }

    /// The type produced by subscripting a value of this type.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::Pointer(sub) | Type::Array(sub, _) => Some(sub),
            _ => None,
        }
    }

    /// Looks a field up by name. The first declared match wins.
    pub fn field_type(&self, field: &str) -> Option<&Type> {
        match self {
            Type::Struct { fields, .. } => fields
                .iter()
                .find(|(name, _)| name == field)
                .map(|(_, type_)| type_),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Primitive(_) => "primitive",
            Type::Pointer(_) => "pointer",
            Type::Array(_, _) => "array",
            Type::Struct { .. } => "struct",
            Type::Function { .. } => "function",
        }
    }
}

/// Type compatibility.
///
/// - primitives are equal when their names are
/// - structs are nominal: equal when their names are
/// - pointers and arrays are equal when their element types are; array
///   length is not compared
/// - functions are equal when return and parameter types are pairwise equal
impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Primitive(left), Type::Primitive(right)) => left == right,
            (Type::Struct { name: left, .. }, Type::Struct { name: right, .. }) => left == right,
            (Type::Pointer(left), Type::Pointer(right)) => left == right,
            (Type::Array(left, _), Type::Array(right, _)) => left == right,
            (
                Type::Function {
                    return_type: left_return,
                    parameters: left_parameters,
                },
                Type::Function {
                    return_type: right_return,
                    parameters: right_parameters,
                },
            ) => left_return == right_return && left_parameters == right_parameters,
            _ => false,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(name) => write!(f, "{}", name),
            Type::Struct { name, .. } => write!(f, "{}", name),
            Type::Pointer(sub) => write!(f, "*{}", sub),
            Type::Array(sub, Some(length)) => write!(f, "[{}]{}", length, sub),
            Type::Array(sub, None) => write!(f, "[]{}", sub),
            Type::Function {
                return_type,
                parameters,
            } => {
                let parameters = parameters
                    .iter()
                    .map(|parameter| parameter.to_string())
                    .collect::<Vec<String>>();
                write!(f, "fn({}) -> {}", parameters.join(", "), return_type)
            }
        }
    }
}
