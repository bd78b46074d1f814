//! Unit tests for the AST: rendering and shape equality.

use std::rc::Rc;

use super::{
    expressions::{BinaryOperator, Expr, ExprKind, UnaryOperator},
    statements::{BlockStmt, Stmt},
    types::{TypeAnnotation, TypeModifier},
};
use crate::{lexer::lexer::tokenize, parser::parser::parse, Position, Span};

fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Identifier(name.to_string()), Span::null())
}

fn binary(operator: BinaryOperator, left: Expr, right: Expr) -> Expr {
    Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        Span::null(),
    )
}

fn parse_source(source: &str) -> BlockStmt {
    let tokens = tokenize(source.to_string(), Some("test.c".to_string())).unwrap();
    parse(tokens, Rc::new("test.c".to_string())).unwrap()
}

#[test]
fn test_expression_display_is_fully_parenthesized() {
    let expr = binary(
        BinaryOperator::Add,
        ident("a"),
        binary(BinaryOperator::Multiply, ident("b"), ident("c")),
    );
    assert_eq!(expr.to_string(), "(a + (b * c))");

    let negated = Expr::new(
        ExprKind::Unary {
            operator: UnaryOperator::Negate,
            operand: Box::new(ident("x")),
        },
        Span::null(),
    );
    assert_eq!(negated.to_string(), "(-x)");

    assert_eq!(
        binary(BinaryOperator::Subscript, ident("a"), ident("i")).to_string(),
        "(a[i])"
    );
    assert_eq!(
        binary(BinaryOperator::Member, ident("p"), ident("x")).to_string(),
        "(p.x)"
    );
}

#[test]
fn test_call_and_string_display() {
    let call = Expr::new(
        ExprKind::Call {
            name: "print".to_string(),
            arguments: vec![
                Expr::new(ExprKind::String("a \"b\"\n".to_string()), Span::null()),
                Expr::new(ExprKind::Number(3), Span::null()),
            ],
        },
        Span::null(),
    );

    assert_eq!(call.to_string(), "print(\"a \\\"b\\\"\\n\", 3)");
}

#[test]
fn test_expression_equality_ignores_spans() {
    let here = Span {
        start: Position(4, Rc::new("a.c".to_string())),
        end: Position(5, Rc::new("a.c".to_string())),
    };
    let mut located = Expr::new(ExprKind::Identifier("x".to_string()), here);
    located.ty = Some(crate::types::types::Type::primitive("int"));

    assert_eq!(located, ident("x"));
    assert_ne!(located, ident("y"));
}

#[test]
fn test_type_annotation_display() {
    let annotation = TypeAnnotation {
        name: "int".to_string(),
        modifiers: vec![
            TypeModifier::Pointer,
            TypeModifier::Array(Some(4)),
            TypeModifier::Array(None),
        ],
        span: Span::null(),
    };

    assert_eq!(annotation.to_string(), "*[4][]int");
    assert_eq!(TypeAnnotation::named("Point", Span::null()).to_string(), "Point");
}

#[test]
fn test_statement_display() {
    let program = parse_source(
        "struct P { x : int; }\nfn f(a : int, b : *P) -> int { if (a < 1) { return a; } else { return 0; } }\n",
    );

    let expected = "\
struct P {
    x : int;
}
fn f(a : int, b : *P) -> int {
    if ((a < 1)) {
        return a;
    } else {
        return 0;
    }
}
";
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_statement_display_reparses() {
    let source = "\
fn main() {
    i := 0;
    for (j : int = 0; j < 10; j = j + 1) { i = i + j; }
    while (i > 0) { i = i - 1; }
    if (i == 0) { ; } else if (i == 1) { {} }
    return;
}
";
    let program = parse_source(source);
    let reparsed = parse_source(&program.to_string());

    assert_eq!(program, reparsed);
}

#[test]
fn test_get_span_covers_statement() {
    let program = parse_source("x : int = 1;");
    let Stmt::VarDecl(decl) = &program.body[0] else {
        panic!("expected a declaration");
    };

    assert_eq!(decl.span.start.0, 0);
    assert_eq!(program.body[0].get_span().end.0, 12);
}
