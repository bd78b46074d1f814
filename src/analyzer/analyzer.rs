use crate::{
    ast::statements::{
        BlockStmt, FnDeclStmt, ForStmt, IfStmt, ReturnStmt, Stmt, StructDeclStmt, VarDeclStmt,
        WhileStmt,
    },
    errors::errors::{Error, ErrorImpl},
    types::{registry::TypeRegistry, types::Type},
    Position,
};

use super::{
    expr::type_of,
    stack::{Stack, Variable},
};

/// The function whose body is being analyzed.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    pub name: String,
    pub return_type: Type,
}

/// Everything one analysis run knows: the scope stack, the named types and
/// the enclosing function, if any.
#[derive(Debug, Clone)]
pub struct AnalyzerContext {
    pub stack: Stack,
    pub registry: TypeRegistry,
    pub current_function: Option<FunctionContext>,
}

impl AnalyzerContext {
    pub fn new() -> Self {
        AnalyzerContext {
            stack: Stack::new(),
            registry: TypeRegistry::new(),
            current_function: None,
        }
    }
}

impl Default for AnalyzerContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyzes a translation unit with a fresh context.
///
/// Stops at the first error. On success every expression in `program`
/// carries its type and every declaration its resolved type.
pub fn analyze(program: &mut [Stmt]) -> Result<(), Error> {
    let mut ctx = AnalyzerContext::new();
    analyze_statements(&mut ctx, program)
}

pub fn analyze_statements(ctx: &mut AnalyzerContext, statements: &mut [Stmt]) -> Result<(), Error> {
    for stmt in statements.iter_mut() {
        analyze_stmt(ctx, stmt)?;
    }
    Ok(())
}

pub fn analyze_stmt(ctx: &mut AnalyzerContext, stmt: &mut Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::FnDecl(decl) => analyze_fn_decl(ctx, decl),
        Stmt::StructDecl(decl) => analyze_struct_decl(ctx, decl),
        Stmt::VarDecl(decl) => analyze_var_decl(ctx, decl),
        Stmt::Block(block) => analyze_block(ctx, block),
        Stmt::If(stmt) => analyze_if(ctx, stmt),
        Stmt::For(stmt) => analyze_for(ctx, stmt),
        Stmt::While(stmt) => analyze_while(ctx, stmt),
        Stmt::Return(stmt) => analyze_return(ctx, stmt),
        Stmt::Expression(stmt) => {
            if let Some(expression) = &mut stmt.expression {
                type_of(ctx, expression)?;
            }
            Ok(())
        }
    }
}

/// Opens a frame for the block's statements.
pub fn analyze_block(ctx: &mut AnalyzerContext, block: &mut BlockStmt) -> Result<(), Error> {
    ctx.stack.push_frame(block.span.start.clone())?;
    analyze_statements(ctx, &mut block.body)?;
    ctx.stack.pop_frame(block.span.end.clone())
}

fn require_local_scope(ctx: &AnalyzerContext, statement: &str, position: &Position) -> Result<(), Error> {
    if ctx.stack.is_global() {
        return Err(Error::new(
            ErrorImpl::GlobalControlFlow {
                statement: String::from(statement),
            },
            position.clone(),
        ));
    }
    Ok(())
}

fn analyze_fn_decl(ctx: &mut AnalyzerContext, decl: &mut FnDeclStmt) -> Result<(), Error> {
    let position = decl.span.start.clone();

    if !ctx.stack.is_global() {
        return Err(Error::new(
            ErrorImpl::NestedFunction {
                function: decl.name.clone(),
            },
            position,
        ));
    }

    if ctx.stack.find_in_current_frame(&decl.name).is_some() {
        return Err(Error::new(
            ErrorImpl::FunctionAlreadyDeclared {
                function: decl.name.clone(),
            },
            position,
        ));
    }

    let return_type = ctx.registry.build_annotation(&decl.return_type)?;
    let parameters = decl
        .parameters
        .iter()
        .map(|parameter| ctx.registry.build_annotation(&parameter.type_))
        .collect::<Result<Vec<Type>, Error>>()?;

    // Bound before the body so the function can call itself.
    ctx.stack.append(Variable::new(
        &decl.name,
        Type::Function {
            return_type: Box::new(return_type.clone()),
            parameters: parameters.clone(),
        },
    ));

    // Parameters and the body's own declarations share one frame.
    ctx.stack.push_frame(decl.body.span.start.clone())?;

    for (parameter, type_) in decl.parameters.iter().zip(parameters) {
        if ctx.stack.find_in_current_frame(&parameter.name).is_some() {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: parameter.name.clone(),
                },
                parameter.span.start.clone(),
            ));
        }
        ctx.stack.append(Variable::new(&parameter.name, type_));
    }

    let enclosing = ctx.current_function.replace(FunctionContext {
        name: decl.name.clone(),
        return_type,
    });
    let result = analyze_statements(ctx, &mut decl.body.body);
    ctx.current_function = enclosing;
    result?;

    ctx.stack.pop_frame(decl.body.span.end.clone())
}

fn invalid_field(decl: &StructDeclStmt, message: String, position: &Position) -> Error {
    Error::new(
        ErrorImpl::InvalidStructField {
            structure: decl.name.clone(),
            message,
        },
        position.clone(),
    )
}

fn analyze_struct_decl(ctx: &mut AnalyzerContext, decl: &mut StructDeclStmt) -> Result<(), Error> {
    let position = decl.span.start.clone();

    if !ctx.stack.is_global() {
        return Err(Error::new(
            ErrorImpl::NestedStruct {
                structure: decl.name.clone(),
            },
            position,
        ));
    }

    if ctx.registry.contains(&decl.name) {
        return Err(Error::new(
            ErrorImpl::TypeAlreadyDeclared {
                type_: decl.name.clone(),
            },
            position,
        ));
    }

    let mut fields: Vec<(String, Type)> = Vec::new();

    for stmt in decl.body.body.iter() {
        let Stmt::VarDecl(field) = stmt else {
            return Err(invalid_field(
                decl,
                String::from("only field declarations are allowed"),
                &stmt.get_span().start,
            ));
        };

        let annotation = match (&field.declared_type, &field.initializer) {
            (Some(annotation), None) => annotation,
            (_, Some(_)) => {
                return Err(invalid_field(
                    decl,
                    format!("field `{}` cannot have an initializer", field.name),
                    &field.span.start,
                ))
            }
            (None, None) => {
                return Err(Error::internal(
                    format!("field `{}` has neither a type nor a value", field.name),
                    field.span.start.clone(),
                ))
            }
        };

        if fields.iter().any(|(name, _)| *name == field.name) {
            return Err(invalid_field(
                decl,
                format!("duplicate field `{}`", field.name),
                &field.span.start,
            ));
        }

        let type_ = ctx.registry.build_annotation(annotation)?;
        fields.push((field.name.clone(), type_));
    }

    for stmt in decl.body.body.iter_mut() {
        if let Stmt::VarDecl(field) = stmt {
            field.resolved_type = fields
                .iter()
                .find(|(name, _)| *name == field.name)
                .map(|(_, type_)| type_.clone());
        }
    }

    ctx.registry.register_struct(&decl.name, fields);
    Ok(())
}

fn analyze_var_decl(ctx: &mut AnalyzerContext, decl: &mut VarDeclStmt) -> Result<(), Error> {
    if ctx.stack.find_in_current_frame(&decl.name).is_some() {
        return Err(Error::new(
            ErrorImpl::VariableAlreadyDeclared {
                variable: decl.name.clone(),
            },
            decl.span.start.clone(),
        ));
    }

    let type_ = match (&decl.declared_type, &mut decl.initializer) {
        (Some(annotation), Some(initializer)) => {
            let declared = ctx.registry.build_annotation(annotation)?;
            let received = type_of(ctx, initializer)?;

            if declared != received {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        variable: decl.name.clone(),
                        expected: declared.to_string(),
                        received: received.to_string(),
                        expression: initializer.to_string(),
                    },
                    initializer.span.start.clone(),
                ));
            }

            declared
        }
        (Some(annotation), None) => ctx.registry.build_annotation(annotation)?,
        (None, Some(initializer)) => type_of(ctx, initializer)?,
        (None, None) => {
            return Err(Error::internal(
                format!("variable `{}` has neither a type nor a value", decl.name),
                decl.span.start.clone(),
            ))
        }
    };

    ctx.stack.append(Variable::new(&decl.name, type_.clone()));
    decl.resolved_type = Some(type_);
    Ok(())
}

// Conditions are typed but not required to be `bool`.

fn analyze_if(ctx: &mut AnalyzerContext, stmt: &mut IfStmt) -> Result<(), Error> {
    require_local_scope(ctx, "if", &stmt.span.start)?;

    type_of(ctx, &mut stmt.condition)?;
    analyze_block(ctx, &mut stmt.then_body)?;

    if let Some(else_body) = &mut stmt.else_body {
        analyze_stmt(ctx, else_body)?;
    }

    Ok(())
}

fn analyze_while(ctx: &mut AnalyzerContext, stmt: &mut WhileStmt) -> Result<(), Error> {
    require_local_scope(ctx, "while", &stmt.span.start)?;

    type_of(ctx, &mut stmt.condition)?;
    analyze_block(ctx, &mut stmt.body)
}

/// One frame holds the loop variable, the clauses and the body.
fn analyze_for(ctx: &mut AnalyzerContext, stmt: &mut ForStmt) -> Result<(), Error> {
    require_local_scope(ctx, "for", &stmt.span.start)?;

    ctx.stack.push_frame(stmt.span.start.clone())?;

    if let Some(init) = &mut stmt.init {
        analyze_stmt(ctx, init)?;
    }
    if let Some(condition) = &mut stmt.condition {
        type_of(ctx, condition)?;
    }
    if let Some(step) = &mut stmt.step {
        type_of(ctx, step)?;
    }
    analyze_statements(ctx, &mut stmt.body.body)?;

    ctx.stack.pop_frame(stmt.span.end.clone())
}

fn analyze_return(ctx: &mut AnalyzerContext, stmt: &mut ReturnStmt) -> Result<(), Error> {
    require_local_scope(ctx, "return", &stmt.span.start)?;

    let Some(function) = ctx.current_function.clone() else {
        return Err(Error::new(
            ErrorImpl::GlobalControlFlow {
                statement: String::from("return"),
            },
            stmt.span.start.clone(),
        ));
    };

    // A bare `return;` has no expression text to report.
    let (received, expression) = match &mut stmt.value {
        Some(value) => (type_of(ctx, value)?, value.to_string()),
        None => (Type::primitive("void"), String::new()),
    };

    if received != function.return_type {
        return Err(Error::new(
            ErrorImpl::ReturnTypeMatchError {
                function: function.name,
                expected: function.return_type.to_string(),
                received: received.to_string(),
                expression,
            },
            stmt.span.start.clone(),
        ));
    }

    Ok(())
}
