use crate::{
    ast::expressions::{BinaryOperator, Expr, ExprKind, UnaryOperator},
    errors::errors::{Error, ErrorImpl},
    types::types::Type,
};

use super::analyzer::AnalyzerContext;

/// Computes the type of `expr`, recording it in `expr.ty` and in the `ty` of
/// every sub-expression.
pub fn type_of(ctx: &mut AnalyzerContext, expr: &mut Expr) -> Result<Type, Error> {
    let type_ = match expr.kind {
        ExprKind::Number(_) => Type::primitive("int"),
        ExprKind::String(_) => Type::primitive("string"),
        ExprKind::Identifier(_) => type_of_identifier(ctx, expr)?,
        ExprKind::Call { .. } => type_of_call(ctx, expr)?,
        ExprKind::Unary { .. } => type_of_unary(ctx, expr)?,
        ExprKind::Binary { .. } => type_of_binary(ctx, expr)?,
    };

    expr.ty = Some(type_.clone());
    Ok(type_)
}

fn type_of_identifier(ctx: &AnalyzerContext, expr: &Expr) -> Result<Type, Error> {
    let ExprKind::Identifier(name) = &expr.kind else {
        return Err(Error::internal(
            "expected an identifier expression",
            expr.span.start.clone(),
        ));
    };

    match ctx.stack.find(name) {
        Some(variable) => Ok(variable.type_.clone()),
        None => Err(Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: name.clone(),
            },
            expr.span.start.clone(),
        )),
    }
}

/// Arguments are checked against parameters left to right; an arity error
/// is raised where the lists stop lining up.
fn type_of_call(ctx: &mut AnalyzerContext, expr: &mut Expr) -> Result<Type, Error> {
    let position = expr.span.start.clone();
    let ExprKind::Call { name, arguments } = &mut expr.kind else {
        return Err(Error::internal("expected a call expression", position));
    };

    let callee = match ctx.stack.find(name) {
        Some(variable) => variable.type_.clone(),
        None => {
            return Err(Error::new(
                ErrorImpl::FunctionNotDeclared {
                    function: name.clone(),
                },
                position,
            ))
        }
    };

    let (return_type, parameters) = match callee {
        Type::Function {
            return_type,
            parameters,
        } => (return_type, parameters),
        other => {
            return Err(Error::new(
                ErrorImpl::NotCallable {
                    name: name.clone(),
                    type_: other.to_string(),
                },
                position,
            ))
        }
    };

    for (index, argument) in arguments.iter_mut().enumerate() {
        let received = type_of(ctx, argument)?;

        let Some(expected) = parameters.get(index) else {
            return Err(Error::new(
                ErrorImpl::UnexpectedArguments {
                    function: name.clone(),
                    expected: parameters.len(),
                    received: received.to_string(),
                },
                argument.span.start.clone(),
            ));
        };

        if *expected != received {
            return Err(Error::new(
                ErrorImpl::ArgumentTypeMatchError {
                    function: name.clone(),
                    position: index + 1,
                    expected: expected.to_string(),
                    received: received.to_string(),
                    expression: argument.to_string(),
                },
                argument.span.start.clone(),
            ));
        }
    }

    if arguments.len() < parameters.len() {
        return Err(Error::new(
            ErrorImpl::MissingArguments {
                function: name.clone(),
                expected: parameters.len(),
                received: arguments.len(),
            },
            position,
        ));
    }

    Ok(*return_type)
}

fn type_of_unary(ctx: &mut AnalyzerContext, expr: &mut Expr) -> Result<Type, Error> {
    let position = expr.span.start.clone();
    let ExprKind::Unary { operator, operand } = &mut expr.kind else {
        return Err(Error::internal("expected a unary expression", position));
    };
    let operator = *operator;

    let operand_type = type_of(ctx, operand)?;

    let (allowed, expected): (&[&str], &str) = match operator {
        UnaryOperator::Not => (&["bool"], "`bool`"),
        UnaryOperator::Negate | UnaryOperator::Increment | UnaryOperator::Decrement => {
            (&["int", "float"], "`int` or `float`")
        }
    };

    if !operand_type.is_one_of(allowed) {
        return Err(Error::new(
            ErrorImpl::UnaryOperandError {
                operator: String::from(operator.symbol()),
                expected: String::from(expected),
                received: operand_type.to_string(),
                expression: expr.to_string(),
            },
            position,
        ));
    }

    Ok(operand_type)
}

fn type_of_binary(ctx: &mut AnalyzerContext, expr: &mut Expr) -> Result<Type, Error> {
    let position = expr.span.start.clone();
    let ExprKind::Binary {
        operator,
        left,
        right,
    } = &mut expr.kind
    else {
        return Err(Error::internal("expected a binary expression", position));
    };
    let operator = *operator;

    match operator {
        BinaryOperator::Member => return type_of_member(ctx, left, right),
        BinaryOperator::Subscript => return type_of_subscript(ctx, left, right),
        _ => {}
    }

    let left_type = type_of(ctx, left)?;
    let right_type = type_of(ctx, right)?;

    if left_type != right_type {
        return Err(Error::new(
            ErrorImpl::OperandTypeMatchError {
                operator: String::from(operator.symbol()),
                left: left_type.to_string(),
                right: right_type.to_string(),
                expression: expr.to_string(),
            },
            position,
        ));
    }

    Ok(match operator {
        BinaryOperator::Assign => Type::primitive("void"),
        BinaryOperator::Equals
        | BinaryOperator::NotEquals
        | BinaryOperator::Less
        | BinaryOperator::LessEquals
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEquals => Type::primitive("bool"),
        _ => left_type,
    })
}

/// `left.field`: `left` must be a struct and `field` a bare identifier.
fn type_of_member(ctx: &mut AnalyzerContext, left: &mut Expr, right: &mut Expr) -> Result<Type, Error> {
    let left_type = type_of(ctx, left)?;

    let Type::Struct { name, .. } = &left_type else {
        return Err(Error::new(
            ErrorImpl::NotAStruct {
                type_: left_type.to_string(),
                expression: left.to_string(),
            },
            left.span.start.clone(),
        ));
    };

    let ExprKind::Identifier(field) = &right.kind else {
        return Err(Error::new(
            ErrorImpl::ExpectedFieldName {
                expression: right.to_string(),
            },
            right.span.start.clone(),
        ));
    };

    let Some(field_type) = left_type.field_type(field).cloned() else {
        return Err(Error::new(
            ErrorImpl::FieldNotFound {
                field: field.clone(),
                structure: name.clone(),
            },
            right.span.start.clone(),
        ));
    };

    right.ty = Some(field_type.clone());
    Ok(field_type)
}

/// `left[index]`: `left` must be an array or pointer and `index` an `int`.
fn type_of_subscript(ctx: &mut AnalyzerContext, left: &mut Expr, index: &mut Expr) -> Result<Type, Error> {
    let left_type = type_of(ctx, left)?;
    let index_type = type_of(ctx, index)?;

    let Some(element_type) = left_type.element_type().cloned() else {
        return Err(Error::new(
            ErrorImpl::NotSubscriptable {
                type_: left_type.to_string(),
                expression: left.to_string(),
            },
            left.span.start.clone(),
        ));
    };

    if !index_type.is_primitive("int") {
        return Err(Error::new(
            ErrorImpl::SubscriptIndexError {
                received: index_type.to_string(),
                expression: index.to_string(),
            },
            index.span.start.clone(),
        ));
    }

    Ok(element_type)
}
