use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone)]
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

    pub fn internal(message: impl Into<String>, position: Position) -> Self {
        Error::new(
            ErrorImpl::InternalError {
                message: message.into(),
            },
            position,
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Classifies the error into the compiler's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::ExpectedFieldName { .. } => ErrorKind::Syntax,
            ErrorImpl::NestingTooDeep { .. } | ErrorImpl::TooManyFrames { .. } => {
                ErrorKind::ResourceLimit
            }
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::TypeAlreadyDeclared { .. } => ErrorKind::Redeclaration,
            ErrorImpl::VariableNotDeclared { .. } | ErrorImpl::FunctionNotDeclared { .. } => {
                ErrorKind::Undeclared
            }
            ErrorImpl::UnknownType { .. } => ErrorKind::UnknownType,
            ErrorImpl::NotCallable { .. } => ErrorKind::NotCallable,
            ErrorImpl::UnexpectedArguments { .. } | ErrorImpl::MissingArguments { .. } => {
                ErrorKind::Arity
            }
            ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::OperandTypeMatchError { .. }
            | ErrorImpl::UnaryOperandError { .. }
            | ErrorImpl::NotAStruct { .. }
            | ErrorImpl::NotSubscriptable { .. }
            | ErrorImpl::SubscriptIndexError { .. }
            | ErrorImpl::ReturnTypeMatchError { .. } => ErrorKind::TypeMismatch,
            ErrorImpl::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            ErrorImpl::GlobalControlFlow { .. }
            | ErrorImpl::NestedFunction { .. }
            | ErrorImpl::NestedStruct { .. }
            | ErrorImpl::InvalidStructField { .. } => ErrorKind::ScopePlacement,
            ErrorImpl::InternalError { .. } => ErrorKind::Internal,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::ExpectedFieldName { .. } => "ExpectedFieldName",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::TooManyFrames { .. } => "TooManyFrames",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::TypeAlreadyDeclared { .. } => "TypeAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::OperandTypeMatchError { .. } => "OperandTypeMatchError",
            ErrorImpl::UnaryOperandError { .. } => "UnaryOperandError",
            ErrorImpl::NotAStruct { .. } => "NotAStruct",
            ErrorImpl::NotSubscriptable { .. } => "NotSubscriptable",
            ErrorImpl::SubscriptIndexError { .. } => "SubscriptIndexError",
            ErrorImpl::ReturnTypeMatchError { .. } => "ReturnTypeMatchError",
            ErrorImpl::FieldNotFound { .. } => "FieldNotFound",
            ErrorImpl::GlobalControlFlow { .. } => "GlobalControlFlow",
            ErrorImpl::NestedFunction { .. } => "NestedFunction",
            ErrorImpl::NestedStruct { .. } => "NestedStruct",
            ErrorImpl::InvalidStructField { .. } => "InvalidStructField",
            ErrorImpl::InternalError { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { found, .. } if *found == TokenKind::EOF => {
                ErrorTip::Suggestion(String::from("Unexpected end of input, is a `}` missing?"))
            }
            ErrorImpl::UnexpectedToken { expected, .. }
                if expected.contains(&TokenKind::Semicolon) =>
            {
                ErrorTip::Suggestion(format!("{}, did you miss a semicolon?", self.internal_error))
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
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::InternalError { .. } => ErrorTip::Suggestion(format!(
                "{}, this is a bug in the compiler",
                self.internal_error
            )),
            _ => ErrorTip::Suggestion(self.internal_error.to_string()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

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

/// The error taxonomy. Every `ErrorImpl` belongs to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Redeclaration,
    Undeclared,
    UnknownType,
    NotCallable,
    Arity,
    TypeMismatch,
    FieldNotFound,
    ScopePlacement,
    ResourceLimit,
    /// A bug in the compiler, never caused by user input.
    Internal,
}

fn format_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<String>>()
        .join(" or ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("expected {}, got {found} at token {index}", format_kinds(.expected))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        index: usize,
    },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("only an identifier can name a field, got `{expression}`")]
    ExpectedFieldName { expression: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("more than {limit} nested scopes")]
    TooManyFrames { limit: usize },
    #[error("redefinition of variable `{variable}`")]
    VariableAlreadyDeclared { variable: String },
    #[error("redefinition of `{function}` as a function")]
    FunctionAlreadyDeclared { function: String },
    #[error("redefinition of type `{type_}` as a struct")]
    TypeAlreadyDeclared { type_: String },
    #[error("use of undeclared variable `{variable}`")]
    VariableNotDeclared { variable: String },
    #[error("use of undeclared function `{function}`")]
    FunctionNotDeclared { function: String },
    #[error("unknown type `{type_}`")]
    UnknownType { type_: String },
    #[error("tried to call `{name}` of type `{type_}` as a function")]
    NotCallable { name: String, type_: String },
    #[error("in call to `{function}` expected {expected} argument(s), got an additional argument of type `{received}`")]
    UnexpectedArguments {
        function: String,
        expected: usize,
        received: String,
    },
    #[error("in call to `{function}` expected {expected} argument(s), received {received}")]
    MissingArguments {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("in call to `{function}` argument {position} expected `{expected}`, received `{received}` `{expression}`")]
    ArgumentTypeMatchError {
        function: String,
        position: usize,
        expected: String,
        received: String,
        expression: String,
    },
    #[error("variable `{variable}` declared as `{expected}` but initialized with `{received}` `{expression}`")]
    TypeMatchError {
        variable: String,
        expected: String,
        received: String,
        expression: String,
    },
    #[error("operator `{operator}` applied to `{left}` and `{right}` which are not the same type `{expression}`")]
    OperandTypeMatchError {
        operator: String,
        left: String,
        right: String,
        expression: String,
    },
    #[error("operator `{operator}` expects {expected}, received `{received}` `{expression}`")]
    UnaryOperandError {
        operator: String,
        expected: String,
        received: String,
        expression: String,
    },
    #[error("member access on non struct type `{type_}` `{expression}`")]
    NotAStruct { type_: String, expression: String },
    #[error("type `{type_}` cannot be subscripted `{expression}`")]
    NotSubscriptable { type_: String, expression: String },
    #[error("subscript index must be `int`, received `{received}` `{expression}`")]
    SubscriptIndexError { received: String, expression: String },
    #[error("function `{function}` returns `{expected}`, received `{received}` `{expression}`")]
    ReturnTypeMatchError {
        function: String,
        expected: String,
        received: String,
        expression: String,
    },
    #[error("field `{field}` not found in struct `{structure}`")]
    FieldNotFound { field: String, structure: String },
    #[error("`{statement}` statement in global scope")]
    GlobalControlFlow { statement: String },
    #[error("function `{function}` declared outside of global scope")]
    NestedFunction { function: String },
    #[error("struct `{structure}` declared outside of global scope")]
    NestedStruct { structure: String },
    #[error("invalid field in struct `{structure}`: {message}")]
    InvalidStructField { structure: String, message: String },
    #[error("internal error: {message}")]
    InternalError { message: String },
}
