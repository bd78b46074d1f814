use crate::{
    ast::{
        expressions::Expr,
        statements::{
            ArgDecl, BlockStmt, ExpressionStmt, FnDeclStmt, ForStmt, IfStmt, ReturnStmt, Stmt,
            StructDeclStmt, VarDeclStmt, WhileStmt,
        },
        types::TypeAnnotation,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.descend()?;
    let result = parse_stmt_inner(parser);
    parser.ascend();
    result
}

fn parse_stmt_inner(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.peek_kind()).copied() {
        return handler(parser);
    }

    if starts_var_decl(parser) {
        return Ok(Stmt::VarDecl(parse_var_decl(parser)?));
    }

    Ok(Stmt::Expression(parse_expression_stmt(parser)?))
}

/// `IDENT ':'` starts a declaration; anything else is an expression.
fn starts_var_decl(parser: &Parser) -> bool {
    parser.peek_kind() == TokenKind::Identifier && parser.peek_n(2).kind == TokenKind::Colon
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<ExpressionStmt, Error> {
    if parser.peek_kind() == TokenKind::Semicolon {
        let semicolon = parser.advance().clone();
        return Ok(ExpressionStmt {
            expression: None,
            span: semicolon.span,
        });
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(ExpressionStmt {
        span: Span {
            start: expression.span.start.clone(),
            end: semicolon.span.end,
        },
        expression: Some(expression),
    })
}

pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDeclStmt, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;

    let declared_type;
    let initializer;

    match parser.peek_kind() {
        TokenKind::Assignment => {
            parser.advance();
            declared_type = None;
            initializer = Some(parse_expr(parser, BindingPower::Default)?);
        }
        TokenKind::Star | TokenKind::OpenBracket | TokenKind::Identifier => {
            declared_type = Some(parse_type(parser)?);

            if parser.peek_kind() == TokenKind::Assignment {
                parser.advance();
                initializer = Some(parse_expr(parser, BindingPower::Default)?);
            } else {
                initializer = None;
            }
        }
        _ => {
            return Err(parser.unexpected(&[
                TokenKind::Assignment,
                TokenKind::Star,
                TokenKind::OpenBracket,
                TokenKind::Identifier,
            ]))
        }
    }

    let semicolon = parser.expect(TokenKind::Semicolon)?;

    Ok(VarDeclStmt {
        name: name.value,
        declared_type,
        initializer,
        resolved_type: None,
        span: Span {
            start: name.span.start,
            end: semicolon.span.end,
        },
    })
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while !matches!(parser.peek_kind(), TokenKind::CloseCurly | TokenKind::EOF) {
        body.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(BlockStmt {
        body,
        span: Span { start, end },
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

fn parse_parameter(parser: &mut Parser) -> Result<ArgDecl, Error> {
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let type_ = parse_type(parser)?;

    Ok(ArgDecl {
        name: name.value,
        span: Span {
            start: name.span.start,
            end: type_.span.end.clone(),
        },
        type_,
    })
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Fn)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    let close = if parser.peek_kind() == TokenKind::CloseParen {
        parser.advance().clone()
    } else {
        loop {
            parameters.push(parse_parameter(parser)?);

            let separator = parser.expect_one_of(&[TokenKind::Comma, TokenKind::CloseParen])?;
            if separator.kind == TokenKind::CloseParen {
                break separator;
            }
        }
    };

    let return_type = if parser.peek_kind() == TokenKind::Arrow {
        parser.advance();
        parse_type(parser)?
    } else {
        TypeAnnotation::named("void", close.span)
    };

    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        name,
        parameters,
        return_type,
        body,
    }))
}

pub fn parse_struct_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Struct)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;
    let body = parse_block(parser)?;

    Ok(Stmt::StructDecl(StructDeclStmt {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        name,
        body,
    }))
}

/// `( condition )`
fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(condition)
}

fn parse_if(parser: &mut Parser) -> Result<IfStmt, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;
    let condition = parse_condition(parser)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.peek_kind() == TokenKind::Else {
        parser.advance();
        // Each `else if` link counts as one level of nesting.
        if parser.peek_kind() == TokenKind::If {
            Some(Box::new(parse_stmt(parser)?))
        } else {
            Some(Box::new(Stmt::Block(parse_block(parser)?)))
        }
    } else {
        None
    };

    let end = match else_body.as_deref() {
        Some(stmt) => stmt.get_span().end.clone(),
        None => then_body.span.end.clone(),
    };

    Ok(IfStmt {
        condition,
        then_body,
        else_body,
        span: Span { start, end },
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::If(parse_if(parser)?))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::While)?.span.start;
    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        condition,
        body,
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::For)?.span.start;
    parser.expect(TokenKind::OpenParen)?;

    // Each clause consumes its own terminator.
    let init = if parser.peek_kind() == TokenKind::Semicolon {
        parser.advance();
        None
    } else if starts_var_decl(parser) {
        Some(Box::new(Stmt::VarDecl(parse_var_decl(parser)?)))
    } else {
        Some(Box::new(Stmt::Expression(parse_expression_stmt(parser)?)))
    };

    let condition = if parser.peek_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    let step = if parser.peek_kind() == TokenKind::CloseParen {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        init,
        condition,
        step,
        body,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Return)?.span.start;

    let value = if parser.peek_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    let end = parser.expect(TokenKind::Semicolon)?.span.end;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span { start, end },
    }))
}
