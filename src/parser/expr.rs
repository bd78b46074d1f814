use crate::{
    ast::expressions::{BinaryOperator, Expr, ExprKind, UnaryOperator},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{BindingPower, EXPRESSION_START},
    parser::{Parser, MAX_NESTING_DEPTH},
};

/// Parses an expression whose operators all bind tighter than `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.descend()?;
    let result = parse_expr_inner(parser, bp);
    parser.ascend();
    result
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.peek_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected(&EXPRESSION_START)),
    };

    let mut left = nud(parser)?;
    limit_tree_depth(&left)?;

    // Anything without a LED handler ends the expression: `;`, `,`, `)` ...
    loop {
        let token_kind = parser.peek_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        let operator_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);
        if operator_bp <= bp {
            break;
        }

        left = led(parser, left, operator_bp)?;
        limit_tree_depth(&left)?;
    }

    Ok(left)
}

/// Operator chains grow the tree one level per iteration of the loop above
/// without recursing, so the finished tree is measured too.
fn limit_tree_depth(expr: &Expr) -> Result<(), Error> {
    if expr.depth > MAX_NESTING_DEPTH {
        return Err(Error::new(
            ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            },
            expr.span.start.clone(),
        ));
    }
    Ok(())
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Number => {
            let value = token.value.parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;

            Ok(Expr::new(ExprKind::Number(value), token.span))
        }
        TokenKind::String => Ok(Expr::new(ExprKind::String(token.value), token.span)),
        TokenKind::Identifier if parser.peek_kind() == TokenKind::OpenParen => {
            parse_call_expr(parser, token.value, token.span)
        }
        TokenKind::Identifier => Ok(Expr::new(ExprKind::Identifier(token.value), token.span)),
        _ => Err(Error::internal(
            format!("no primary expression starts with {}", token.kind),
            token.span.start,
        )),
    }
}

/// `name(arg, ...)`, entered with the cursor on `name`.
fn parse_call_expr(parser: &mut Parser, name: String, name_span: Span) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];
    let close = if parser.peek_kind() == TokenKind::CloseParen {
        parser.advance().clone()
    } else {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            let separator = parser.expect_one_of(&[TokenKind::Comma, TokenKind::CloseParen])?;
            if separator.kind == TokenKind::CloseParen {
                break separator;
            }
        }
    };

    Ok(Expr::new(
        ExprKind::Call { name, arguments },
        Span {
            start: name_span.start,
            end: close.span.end,
        },
    ))
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = BinaryOperator::from_token(operator_token.kind).ok_or_else(|| {
        Error::internal(
            format!("{} is not a binary operator", operator_token.kind),
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

/// `left[index]`. The index is a full expression closed by `]`.
pub fn parse_subscript_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    let span = Span {
        start: left.span.start.clone(),
        end: close.span.end,
    };

    Ok(Expr::new(
        ExprKind::Binary {
            operator: BinaryOperator::Subscript,
            left: Box::new(left),
            right: Box::new(index),
        },
        span,
    ))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.expect(TokenKind::Dot)?;
    let member = parse_expr(parser, BindingPower::Member)?;

    let span = Span {
        start: left.span.start.clone(),
        end: member.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Binary {
            operator: BinaryOperator::Member,
            left: Box::new(left),
            right: Box::new(member),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operator = UnaryOperator::from_token(operator_token.kind).ok_or_else(|| {
        Error::internal(
            format!("{} is not a prefix operator", operator_token.kind),
            operator_token.span.start.clone(),
        )
    })?;

    let operand = parse_expr(parser, BindingPower::Unary)?;

    let span = Span {
        start: operator_token.span.start,
        end: operand.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Unary {
            operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let mut expr = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    expr.span = Span {
        start: open.span.start,
        end: close.span.end,
    };

    Ok(expr)
}
