use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, types::types::Type, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
    Increment,
    Decrement,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Not => Some(UnaryOperator::Not),
            TokenKind::Dash => Some(UnaryOperator::Negate),
            TokenKind::PlusPlus => Some(UnaryOperator::Increment),
            TokenKind::MinusMinus => Some(UnaryOperator::Decrement),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Negate => "-",
            UnaryOperator::Increment => "++",
            UnaryOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Assign,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Add,
    Subtract,
    Multiply,
    Divide,
    Subscript,
    Member,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Assignment => Some(BinaryOperator::Assign),
            TokenKind::Equals => Some(BinaryOperator::Equals),
            TokenKind::NotEquals => Some(BinaryOperator::NotEquals),
            TokenKind::Less => Some(BinaryOperator::Less),
            TokenKind::LessEquals => Some(BinaryOperator::LessEquals),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::GreaterEquals => Some(BinaryOperator::GreaterEquals),
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Dash => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::OpenBracket => Some(BinaryOperator::Subscript),
            TokenKind::Dot => Some(BinaryOperator::Member),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Assign => "=",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Subscript => "[]",
            BinaryOperator::Member => ".",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(i64),
    String(String),
    Identifier(String),
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        arguments: Vec<Expr>,
    },
}

/// An expression node.
///
/// `ty` starts out empty and is filled in by the analyzer once the node has
/// been typed. `depth` is the height of the subtree rooted here; a leaf has
/// depth 1.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: Option<Type>,
    pub depth: usize,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        let depth = match &kind {
            ExprKind::Number(_) | ExprKind::String(_) | ExprKind::Identifier(_) => 1,
            ExprKind::Unary { operand, .. } => operand.depth + 1,
            ExprKind::Binary { left, right, .. } => left.depth.max(right.depth) + 1,
            ExprKind::Call { arguments, .. } => {
                arguments.iter().map(|argument| argument.depth).max().unwrap_or(0) + 1
            }
        };

        Expr {
            kind,
            span,
            ty: None,
            depth,
        }
    }
}

// Trees compare by shape; spans and analyzer annotations are ignored.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Fully parenthesized rendering: every unary and binary node is wrapped in
/// parentheses, so the output re-parses to the same tree.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Number(value) => write!(f, "{}", value),
            ExprKind::String(value) => write!(f, "\"{}\"", escape_string(value)),
            ExprKind::Identifier(name) => write!(f, "{}", name),
            ExprKind::Unary { operator, operand } => {
                write!(f, "({}{})", operator.symbol(), operand)
            }
            ExprKind::Binary {
                operator: BinaryOperator::Subscript,
                left,
                right,
            } => write!(f, "({}[{}])", left, right),
            ExprKind::Binary {
                operator: BinaryOperator::Member,
                left,
                right,
            } => write!(f, "({}.{})", left, right),
            ExprKind::Binary {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator.symbol(), right),
            ExprKind::Call { name, arguments } => {
                let arguments = arguments
                    .iter()
                    .map(|argument| argument.to_string())
                    .collect::<Vec<String>>();
                write!(f, "{}({})", name, arguments.join(", "))
            }
        }
    }
}
