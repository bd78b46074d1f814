//! Type annotation parsing.
//!
//! An annotation is a run of prefix modifiers followed by a type name:
//!
//! - `*T` pointer to `T`
//! - `[N]T` array of `N` elements of `T`
//! - `[]T` array of unknown length
//!
//! Each leading token has a handler in the type lookup table; modifier
//! handlers recurse for the annotation they apply to.

use std::collections::HashMap;

use crate::{
    ast::types::{TypeAnnotation, TypeModifier},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position, Span,
};

use super::parser::Parser;

/// Type alias for type annotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

const TYPE_START: [TokenKind; 3] = [TokenKind::Star, TokenKind::OpenBracket, TokenKind::Identifier];

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::Star, parse_pointer_type);
    parser.type_nud(TokenKind::OpenBracket, parse_array_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeAnnotation::named(&token.value, token.span))
}

fn wrap(modifier: TypeModifier, start: Position, mut inner: TypeAnnotation) -> TypeAnnotation {
    inner.modifiers.insert(0, modifier);
    inner.span = Span {
        start,
        end: inner.span.end.clone(),
    };
    inner
}

pub fn parse_pointer_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::Star)?.span.start;
    let inner = parse_type(parser)?;

    Ok(wrap(TypeModifier::Pointer, start, inner))
}

pub fn parse_array_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let start = parser.expect(TokenKind::OpenBracket)?.span.start;

    let length = if parser.peek_kind() == TokenKind::Number {
        let token = parser.advance().clone();
        let length = token.value.parse::<usize>().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })?;
        Some(length)
    } else {
        None
    };

    parser.expect(TokenKind::CloseBracket)?;
    let inner = parse_type(parser)?;

    Ok(wrap(TypeModifier::Array(length), start, inner))
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let handler = match parser.get_type_nud_lookup().get(&parser.peek_kind()) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected(&TYPE_START)),
    };

    parser.descend()?;
    let result = handler(parser);
    parser.ascend();
    result
}
