//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Operator precedence and associativity
//! - Print and re-parse of expressions
//! - Declarations, functions and structs
//! - Control flow statements
//! - Syntax errors and the nesting limit

use std::rc::Rc;

use super::parser::{parse, parse_expression, MAX_NESTING_DEPTH};
use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, ExprKind, UnaryOperator},
        statements::{BlockStmt, Stmt},
        types::TypeModifier,
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

fn try_parse(source: &str) -> Result<BlockStmt, Error> {
    let tokens = tokenize(source.to_string(), Some("test.c".to_string())).unwrap();
    parse(tokens, Rc::new("test.c".to_string()))
}

fn parse_ok(source: &str) -> BlockStmt {
    try_parse(source).unwrap()
}

fn expr(source: &str) -> Expr {
    let tokens = tokenize(source.to_string(), Some("test.c".to_string())).unwrap();
    parse_expression(tokens, Rc::new("test.c".to_string())).unwrap()
}

fn rendered(source: &str) -> String {
    expr(source).to_string()
}

#[test]
fn test_precedence() {
    assert_eq!(rendered("a + b * c"), "(a + (b * c))");
    assert_eq!(rendered("a * b + c"), "((a * b) + c)");
    assert_eq!(rendered("a < b + c"), "(a < (b + c))");
    assert_eq!(rendered("x = a == b"), "(x = (a == b))");
    assert_eq!(rendered("a / b - c * d"), "((a / b) - (c * d))");
}

#[test]
fn test_left_associativity() {
    assert_eq!(rendered("a - b - c"), "((a - b) - c)");
    assert_eq!(rendered("a / b / c"), "((a / b) / c)");
    assert_eq!(rendered("a < b < c"), "((a < b) < c)");
}

#[test]
fn test_prefix_operators() {
    assert_eq!(rendered("-a * b"), "((-a) * b)");
    assert_eq!(rendered("!a == b"), "((!a) == b)");
    assert_eq!(rendered("--x + ++y"), "((--x) + (++y))");
    assert_eq!(rendered("- -x"), "(-(-x))");
    assert_eq!(rendered("-a[i]"), "(-(a[i]))");

    let negated = expr("-x");
    assert!(matches!(
        negated.kind,
        ExprKind::Unary {
            operator: UnaryOperator::Negate,
            ..
        }
    ));
}

#[test]
fn test_postfix_operators() {
    assert_eq!(rendered("a[i + 1]"), "(a[(i + 1)])");
    assert_eq!(rendered("a[i][j]"), "((a[i])[j])");
    assert_eq!(rendered("p.x.y"), "((p.x).y)");
    assert_eq!(rendered("p.x[0]"), "((p.x)[0])");
    assert_eq!(rendered("a[p.x]"), "(a[(p.x)])");
    assert_eq!(rendered("p.x + q.y * 2"), "((p.x) + ((q.y) * 2))");
}

#[test]
fn test_grouping() {
    assert_eq!(rendered("(a + b) * c"), "((a + b) * c)");
    assert_eq!(rendered("((a))"), "a");
}

#[test]
fn test_calls() {
    assert_eq!(rendered("f()"), "f()");
    assert_eq!(rendered("f(a, b + 1, g(c))"), "f(a, (b + 1), g(c))");
    assert_eq!(rendered("f(x) * 2"), "(f(x) * 2)");

    let call = expr("add(1, 2)");
    let ExprKind::Call { name, arguments } = &call.kind else {
        panic!("expected a call");
    };
    assert_eq!(name, "add");
    assert_eq!(arguments.len(), 2);
}

#[test]
fn test_literals() {
    assert_eq!(expr("42").kind, ExprKind::Number(42));
    assert_eq!(
        expr("\"hi\\n\"").kind,
        ExprKind::String("hi\n".to_string())
    );
}

#[test]
fn test_print_reparse_round_trip() {
    let sources = [
        "a + b * c - d / e",
        "x = y = z",
        "!(a == b) != (c < d)",
        "-(-x) * --y",
        "f(a[i].x, \"s\\t\\\"q\\\"\", (1 + 2) * 3)",
        "p.next.value[3 + k] >= limit",
        "a <= b == (c > d)",
    ];

    for source in sources {
        let first = expr(source);
        let printed = first.to_string();
        let second = expr(&printed);

        assert_eq!(first, second, "re-parsing `{}`", printed);
        assert_eq!(second.to_string(), printed);
    }
}

#[test]
fn test_assignment_is_left_associative() {
    let assignment = expr("x = y = z");
    let ExprKind::Binary {
        operator: BinaryOperator::Assign,
        left,
        ..
    } = &assignment.kind
    else {
        panic!("expected an assignment");
    };

    assert_eq!(left.to_string(), "(x = y)");
}

#[test]
fn test_parse_variable_declarations() {
    let program = parse_ok("x : int = 42; y : *[4]char; z := x + 1;");
    assert_eq!(program.body.len(), 3);

    let Stmt::VarDecl(x) = &program.body[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(x.name, "x");
    assert_eq!(x.declared_type.as_ref().map(|type_| type_.name.as_str()), Some("int"));
    assert_eq!(x.initializer, Some(expr("42")));

    let Stmt::VarDecl(y) = &program.body[1] else {
        panic!("expected a declaration");
    };
    let annotation = y.declared_type.as_ref().unwrap();
    assert_eq!(annotation.name, "char");
    assert_eq!(
        annotation.modifiers,
        vec![TypeModifier::Pointer, TypeModifier::Array(Some(4))]
    );
    assert!(y.initializer.is_none());

    let Stmt::VarDecl(z) = &program.body[2] else {
        panic!("expected a declaration");
    };
    assert!(z.declared_type.is_none());
    assert_eq!(z.initializer, Some(expr("x + 1")));
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_ok("fn add(a : int, b : int) -> int { return a + b; }");

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected a function");
    };
    assert_eq!(function.name, "add");
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[1].name, "b");
    assert_eq!(function.return_type.name, "int");
    assert!(matches!(function.body.body[0], Stmt::Return(_)));
}

#[test]
fn test_function_return_type_defaults_to_void() {
    let program = parse_ok("fn main() { }");

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected a function");
    };
    assert!(function.parameters.is_empty());
    assert_eq!(function.return_type.name, "void");
    assert!(function.return_type.modifiers.is_empty());
}

#[test]
fn test_parse_struct_definition() {
    let program = parse_ok("struct Point { x : int; y : int; }");

    let Stmt::StructDecl(structure) = &program.body[0] else {
        panic!("expected a struct");
    };
    assert_eq!(structure.name, "Point");
    assert_eq!(structure.body.body.len(), 2);
}

#[test]
fn test_parse_control_flow() {
    let program = parse_ok(
        "fn main() {
            if (x > 0) { y = 1; } else if (x < 0) { y = 2; } else { y = 3; }
            while (x < 10) { x = x + 1; }
            for (i := 0; i < 10; i = i + 1) { }
            for (;;) { return; }
        }",
    );

    let Stmt::FnDecl(function) = &program.body[0] else {
        panic!("expected a function");
    };
    let body = &function.body.body;
    assert_eq!(body.len(), 4);

    let Stmt::If(if_stmt) = &body[0] else {
        panic!("expected an if");
    };
    let Some(Stmt::If(else_if)) = if_stmt.else_body.as_deref() else {
        panic!("expected an else if");
    };
    assert!(matches!(else_if.else_body.as_deref(), Some(Stmt::Block(_))));

    assert!(matches!(body[1], Stmt::While(_)));

    let Stmt::For(counted) = &body[2] else {
        panic!("expected a for");
    };
    assert!(matches!(counted.init.as_deref(), Some(Stmt::VarDecl(_))));
    assert_eq!(counted.condition, Some(expr("i < 10")));
    assert_eq!(counted.step, Some(expr("i = i + 1")));

    let Stmt::For(forever) = &body[3] else {
        panic!("expected a for");
    };
    assert!(forever.init.is_none());
    assert!(forever.condition.is_none());
    assert!(forever.step.is_none());
}

#[test]
fn test_empty_statement_and_nested_blocks() {
    let program = parse_ok("; { { } ; }");
    assert_eq!(program.body.len(), 2);

    let Stmt::Expression(empty) = &program.body[0] else {
        panic!("expected an empty statement");
    };
    assert!(empty.expression.is_none());

    let Stmt::Block(block) = &program.body[1] else {
        panic!("expected a block");
    };
    assert_eq!(block.body.len(), 2);
}

#[test]
fn test_empty_program() {
    assert!(parse_ok("").body.is_empty());
    assert!(parse_ok("// nothing here\n").body.is_empty());
}

fn expect_unexpected(source: &str) -> (Vec<TokenKind>, TokenKind, usize) {
    let error = try_parse(source).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);

    match error.get_impl() {
        ErrorImpl::UnexpectedToken {
            expected,
            found,
            index,
        } => (expected.clone(), *found, *index),
        other => panic!("expected UnexpectedToken, got {:?}", other),
    }
}

#[test]
fn test_missing_semicolon() {
    let (expected, found, index) = expect_unexpected("x = 1 y = 2;");
    assert_eq!(expected, vec![TokenKind::Semicolon]);
    assert_eq!(found, TokenKind::Identifier);
    assert_eq!(index, 3);
}

#[test]
fn test_unclosed_block() {
    let (expected, found, _) = expect_unexpected("fn main() { x := 1;");
    assert_eq!(expected, vec![TokenKind::CloseCurly]);
    assert_eq!(found, TokenKind::EOF);
}

#[test]
fn test_missing_closing_paren() {
    let (expected, found, _) = expect_unexpected("x := (1 + 2;");
    assert_eq!(expected, vec![TokenKind::CloseParen]);
    assert_eq!(found, TokenKind::Semicolon);
}

#[test]
fn test_missing_operand() {
    let (expected, found, _) = expect_unexpected("x := 1 + ;");
    assert!(expected.contains(&TokenKind::Number));
    assert!(expected.contains(&TokenKind::Identifier));
    assert_eq!(found, TokenKind::Semicolon);
}

#[test]
fn test_declaration_without_type_or_value() {
    let (expected, found, _) = expect_unexpected("x : ;");
    assert!(expected.contains(&TokenKind::Assignment));
    assert!(expected.contains(&TokenKind::Identifier));
    assert_eq!(found, TokenKind::Semicolon);
}

#[test]
fn test_bad_argument_separator() {
    let (expected, found, _) = expect_unexpected("f(a b);");
    assert_eq!(expected, vec![TokenKind::Comma, TokenKind::CloseParen]);
    assert_eq!(found, TokenKind::Identifier);
}

#[test]
fn test_if_requires_block() {
    let (expected, found, _) = expect_unexpected("fn main() { if (x) y = 1; }");
    assert_eq!(expected, vec![TokenKind::OpenCurly]);
    assert_eq!(found, TokenKind::Identifier);
}

#[test]
fn test_error_position_points_at_token() {
    let error = try_parse("x := 1\n}").unwrap_err();
    assert_eq!(error.get_position().0, 7);
}

#[test]
fn test_number_too_large() {
    let error = try_parse("x := 99999999999999999999;").unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::NumberParseError { .. }));
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING_DEPTH + 10;
    let source = format!("x := {}1{};", "(".repeat(depth), ")".repeat(depth));

    let error = try_parse(&source).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResourceLimit);
    assert!(matches!(
        error.get_impl(),
        ErrorImpl::NestingTooDeep { limit } if *limit == MAX_NESTING_DEPTH
    ));

    let shallow = format!("x := {}1{};", "(".repeat(100), ")".repeat(100));
    assert!(try_parse(&shallow).is_ok());
}

#[test]
fn test_long_operator_chain_is_bounded() {
    let terms = vec!["a"; 200].join(" + ");
    let program = try_parse(&format!("x := {};", terms)).unwrap();
    let Stmt::VarDecl(decl) = &program.body[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(decl.initializer.as_ref().map(|value| value.depth), Some(200));

    let terms = vec!["a"; 5000].join(" + ");
    let error = try_parse(&format!("x := {};", terms)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResourceLimit);
    assert!(matches!(error.get_impl(), ErrorImpl::NestingTooDeep { .. }));
}

#[test]
fn test_expression_depth() {
    assert_eq!(expr("a").depth, 1);
    assert_eq!(expr("-a").depth, 2);
    assert_eq!(expr("a + b * c").depth, 3);
    assert_eq!(expr("((a))").depth, 1);
    assert_eq!(expr("f(a, b + c)").depth, 3);
    assert_eq!(expr("p.x[i]").depth, 3);
}

fn else_if_chain(links: usize) -> String {
    format!(
        "fn main() {{ if (1 == 1) {{ }}{} }}",
        " else if (1 == 1) { }".repeat(links)
    )
}

#[test]
fn test_else_if_chain_counts_toward_nesting() {
    let program = try_parse(&else_if_chain(50)).unwrap();
    let Stmt::FnDecl(main) = &program.body[0] else {
        panic!("expected a function");
    };
    assert_eq!(main.body.body.len(), 1);

    let error = try_parse(&else_if_chain(MAX_NESTING_DEPTH + 50)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ResourceLimit);
    assert!(matches!(
        error.get_impl(),
        ErrorImpl::NestingTooDeep { limit } if *limit == MAX_NESTING_DEPTH
    ));
}
