//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry
//! points. The parser keeps lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type annotation handlers

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{expressions::Expr, statements::BlockStmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// How deep expressions, statements and type annotations may nest.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// The cursor `pos` indexes the last consumed token and starts before the
/// first one. `peek` looks at the next token; once the cursor reaches the
/// trailing `EOF` it stays there.
pub struct Parser {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Index of the last consumed token
    pos: i32,
    /// Current nesting depth of expressions, statements and types
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix operator binding powers
    binding_power_lookup: BPLookup,
    /// Lookup table for type annotation handlers
    type_nud_lookup: TypeNUDLookup,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// An `EOF` token is appended if the stream does not already end in one.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end,
                }
            ));
        }

        Parser {
            tokens,
            pos: -1,
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        }
    }

    fn index_ahead(&self, n: usize) -> usize {
        let index = (self.pos + n as i32).max(0) as usize;
        index.min(self.tokens.len() - 1)
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> &Token {
        self.peek_n(1)
    }

    /// Returns the token `n` places ahead of the cursor. `peek_n(1)` is the
    /// next token.
    pub fn peek_n(&self, n: usize) -> &Token {
        &self.tokens[self.index_ahead(n)]
    }

    pub fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Consumes the next token and returns it. Never moves past `EOF`.
    pub fn advance(&mut self) -> &Token {
        self.pos = self.index_ahead(1) as i32;
        &self.tokens[self.pos as usize]
    }

    /// Consumes the next token if it is of the expected kind.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_one_of(&[expected_kind])
    }

    /// Consumes the next token if it is any of the expected kinds.
    pub fn expect_one_of(&mut self, expected_kinds: &[TokenKind]) -> Result<Token, Error> {
        if !expected_kinds.contains(&self.peek_kind()) {
            return Err(self.unexpected(expected_kinds));
        }

        Ok(self.advance().clone())
    }

    /// Builds the error for an unexpected next token.
    pub fn unexpected(&self, expected_kinds: &[TokenKind]) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected: expected_kinds.to_vec(),
                found: self.peek_kind(),
                index: self.index_ahead(1),
            },
            self.get_position(),
        )
    }

    /// Checks if there are statements left before `EOF`.
    pub fn has_tokens(&self) -> bool {
        self.peek_kind() != TokenKind::EOF
    }

    /// Enters one level of nesting.
    pub fn descend(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// This leaves the binding power table alone: `-` is both a prefix and an
    /// infix operator and keeps its infix power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type annotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Returns the source position of the next token.
    pub fn get_position(&self) -> Position {
        self.peek().span.start.clone()
    }
}

fn create_parser(tokens: Vec<Token>, file: Rc<String>) -> Parser {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);
    parser
}

/// Parses a stream of tokens into the translation unit.
///
/// The result is a block holding the top-level statements in source order.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<BlockStmt, Error> {
    let mut parser = create_parser(tokens, Rc::clone(&file));

    let mut body = vec![];
    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    Ok(BlockStmt {
        body,
        span: Span {
            start: Position(0, file),
            end: parser.get_position(),
        },
    })
}

/// Parses a token stream holding exactly one expression.
pub fn parse_expression(tokens: Vec<Token>, file: Rc<String>) -> Result<Expr, Error> {
    let mut parser = create_parser(tokens, file);

    let expr = parse_expr(&mut parser, BindingPower::Default)?;
    parser.expect(TokenKind::EOF)?;

    Ok(expr)
}
