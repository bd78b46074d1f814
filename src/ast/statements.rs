use std::fmt::{self, Display, Write};

use crate::{types::types::Type, Span};

use super::{expressions::Expr, types::TypeAnnotation};

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    FnDecl(FnDeclStmt),
    StructDecl(StructDeclStmt),
    Block(BlockStmt),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::FnDecl(stmt) => &stmt.span,
            Stmt::StructDecl(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
        }
    }
}

/// A `{ ... }` statement sequence. The translation unit itself is a block
/// whose statements are the top-level declarations.
#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl PartialEq for BlockStmt {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

/// `name : type = value;`, `name : type;` or `name := value;`
///
/// The parser guarantees at least one of `declared_type` and `initializer`.
/// `resolved_type` is filled in by the analyzer.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub name: String,
    pub declared_type: Option<TypeAnnotation>,
    pub initializer: Option<Expr>,
    pub resolved_type: Option<Type>,
    pub span: Span,
}

impl PartialEq for VarDeclStmt {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.declared_type == other.declared_type
            && self.initializer == other.initializer
    }
}

#[derive(Debug, Clone)]
pub struct ArgDecl {
    pub name: String,
    pub type_: TypeAnnotation,
    pub span: Span,
}

impl PartialEq for ArgDecl {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.type_ == other.type_
    }
}

#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub name: String,
    pub parameters: Vec<ArgDecl>,
    pub return_type: TypeAnnotation,
    pub body: BlockStmt,
    pub span: Span,
}

impl PartialEq for FnDeclStmt {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.parameters == other.parameters
            && self.return_type == other.return_type
            && self.body == other.body
    }
}

/// `struct Name { field : type; ... }`
///
/// The body is parsed as an ordinary block; the analyzer checks that it only
/// holds plain field declarations.
#[derive(Debug, Clone)]
pub struct StructDeclStmt {
    pub name: String,
    pub body: BlockStmt,
    pub span: Span,
}

impl PartialEq for StructDeclStmt {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.body == other.body
    }
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    /// Either another `If` (for `else if`) or a `Block`.
    pub else_body: Option<Box<Stmt>>,
    pub span: Span,
}

impl PartialEq for IfStmt {
    fn eq(&self, other: &Self) -> bool {
        self.condition == other.condition
            && self.then_body == other.then_body
            && self.else_body == other.else_body
    }
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub condition: Option<Expr>,
    pub step: Option<Expr>,
    pub body: BlockStmt,
    pub span: Span,
}

impl PartialEq for ForStmt {
    fn eq(&self, other: &Self) -> bool {
        self.init == other.init
            && self.condition == other.condition
            && self.step == other.step
            && self.body == other.body
    }
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

impl PartialEq for WhileStmt {
    fn eq(&self, other: &Self) -> bool {
        self.condition == other.condition && self.body == other.body
    }
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

impl PartialEq for ReturnStmt {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// An expression followed by `;`. A lone `;` has no expression.
#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Option<Expr>,
    pub span: Span,
}

impl PartialEq for ExpressionStmt {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

// Source-like rendering, indented four spaces per nesting level.

fn write_block(f: &mut dyn Write, block: &BlockStmt, indent: usize) -> fmt::Result {
    writeln!(f, "{{")?;
    for stmt in block.body.iter() {
        write_stmt(f, stmt, indent + 1)?;
    }
    write!(f, "{}}}", "    ".repeat(indent))
}

fn write_var_decl(f: &mut dyn Write, decl: &VarDeclStmt) -> fmt::Result {
    match (&decl.declared_type, &decl.initializer) {
        (Some(type_), Some(value)) => write!(f, "{} : {} = {};", decl.name, type_, value),
        (Some(type_), None) => write!(f, "{} : {};", decl.name, type_),
        (None, Some(value)) => write!(f, "{} := {};", decl.name, value),
        (None, None) => write!(f, "{} : <missing>;", decl.name),
    }
}

fn write_if(f: &mut dyn Write, stmt: &IfStmt, indent: usize) -> fmt::Result {
    write!(f, "if ({}) ", stmt.condition)?;
    write_block(f, &stmt.then_body, indent)?;
    match stmt.else_body.as_deref() {
        Some(Stmt::If(else_if)) => {
            write!(f, " else ")?;
            write_if(f, else_if, indent)
        }
        Some(Stmt::Block(block)) => {
            write!(f, " else ")?;
            write_block(f, block, indent)
        }
        Some(other) => {
            writeln!(f, " else {{")?;
            write_stmt(f, other, indent + 1)?;
            write!(f, "{}}}", "    ".repeat(indent))
        }
        None => Ok(()),
    }
}

fn write_stmt(f: &mut dyn Write, stmt: &Stmt, indent: usize) -> fmt::Result {
    let padding = "    ".repeat(indent);
    write!(f, "{}", padding)?;

    match stmt {
        Stmt::VarDecl(decl) => write_var_decl(f, decl)?,
        Stmt::FnDecl(decl) => {
            let parameters = decl
                .parameters
                .iter()
                .map(|parameter| format!("{} : {}", parameter.name, parameter.type_))
                .collect::<Vec<String>>();
            write!(f, "fn {}({}) -> {} ", decl.name, parameters.join(", "), decl.return_type)?;
            write_block(f, &decl.body, indent)?;
        }
        Stmt::StructDecl(decl) => {
            write!(f, "struct {} ", decl.name)?;
            write_block(f, &decl.body, indent)?;
        }
        Stmt::Block(block) => write_block(f, block, indent)?,
        Stmt::If(stmt) => write_if(f, stmt, indent)?,
        Stmt::For(stmt) => {
            write!(f, "for (")?;
            match stmt.init.as_deref() {
                Some(Stmt::VarDecl(decl)) => write_var_decl(f, decl)?,
                Some(Stmt::Expression(ExpressionStmt {
                    expression: Some(expression),
                    ..
                })) => write!(f, "{};", expression)?,
                _ => write!(f, ";")?,
            }
            if let Some(condition) = &stmt.condition {
                write!(f, " {}", condition)?;
            }
            write!(f, ";")?;
            if let Some(step) = &stmt.step {
                write!(f, " {}", step)?;
            }
            write!(f, ") ")?;
            write_block(f, &stmt.body, indent)?;
        }
        Stmt::While(stmt) => {
            write!(f, "while ({}) ", stmt.condition)?;
            write_block(f, &stmt.body, indent)?;
        }
        Stmt::Return(stmt) => match &stmt.value {
            Some(value) => write!(f, "return {};", value)?,
            None => write!(f, "return;")?,
        },
        Stmt::Expression(stmt) => match &stmt.expression {
            Some(expression) => write!(f, "{};", expression)?,
            None => write!(f, ";")?,
        },
    }

    writeln!(f)
}

impl Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in self.body.iter() {
            write_stmt(f, stmt, 0)?;
        }
        Ok(())
    }
}
