//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the supported language constructs:
//! - Let, return and expression statements
//! - Identifiers and integer literals
//! - Prefix and infix operators, precedence and associativity
//! - Error cases and their positions

use crate::{
    ast::ast::{Expression, Program, Statement},
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::{parse, parse_named, Parser},
};

fn parse_ok(source: &str) -> Program {
    match parse(source) {
        Ok(program) => program,
        Err(error) => panic!("failed to parse {source:?}: {error}"),
    }
}

fn parse_err(source: &str) -> ErrorImpl {
    match parse(source) {
        Ok(program) => panic!("expected {source:?} to fail, got {program:?}"),
        Err(error) => error.get_kind().clone(),
    }
}

fn single_expression(source: &str) -> Expression {
    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 1, "{source:?}");

    match program.statements.into_iter().next() {
        Some(Statement::Expression(stmt)) => stmt.value,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn assert_identifier(expr: &Expression, expected: &str) {
    match expr {
        Expression::Identifier(ident) => {
            assert_eq!(ident.name, expected);
            assert_eq!(ident.literal(), expected);
        }
        other => panic!("expected identifier {expected}, got {other:?}"),
    }
}

fn assert_integer(expr: &Expression, expected: i64) {
    match expr {
        Expression::IntegerLiteral(int) => {
            assert_eq!(int.value, expected);
            assert_eq!(int.literal(), expected.to_string());
        }
        other => panic!("expected integer {expected}, got {other:?}"),
    }
}

#[test]
fn test_parse_let_statement() {
    let program = parse_ok("let x = 5;");

    assert_eq!(program.statements.len(), 1);
    let Statement::Let(stmt) = &program.statements[0] else {
        panic!("expected let statement");
    };
    assert_eq!(stmt.token.kind, TokenKind::Let);
    assert_eq!(stmt.name.name, "x");
    assert_eq!(stmt.name.token.kind, TokenKind::Ident);
    assert_integer(&stmt.value, 5);
}

#[test]
fn test_parse_let_with_unicode_name() {
    let program = parse_ok("let naïve = café * 2;");

    let Statement::Let(stmt) = &program.statements[0] else {
        panic!("expected let statement");
    };
    assert_eq!(stmt.name.name, "naïve");
    assert_eq!(program.to_string(), "let naïve = (café * 2);");
}

#[test]
fn test_parse_let_statements_in_order() {
    let program = parse_ok("let x = 5;\nlet y = 10;\nlet foobar = y;");
    let names: Vec<&str> = program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Statement::Let(stmt) => stmt.name.name.as_str(),
            other => panic!("expected let statement, got {other:?}"),
        })
        .collect();

    assert_eq!(names, vec!["x", "y", "foobar"]);
    let Statement::Let(last) = &program.statements[2] else {
        unreachable!()
    };
    assert_identifier(&last.value, "y");
    assert_eq!(last.token.line, 3);
}

#[test]
fn test_parse_let_with_expression() {
    let program = parse_ok("let total = a + b * 2");

    let Statement::Let(stmt) = &program.statements[0] else {
        panic!("expected let statement");
    };
    assert_eq!(stmt.value.to_string(), "(a + (b * 2))");
}

#[test]
fn test_parse_return_statement() {
    let program = parse_ok("return 10;");

    assert_eq!(program.statements.len(), 1);
    let Statement::Return(stmt) = &program.statements[0] else {
        panic!("expected return statement");
    };
    assert_eq!(stmt.token.kind, TokenKind::Return);
    assert_eq!(program.statements[0].literal(), "return");
    assert_integer(&stmt.value, 10);
}

#[test]
fn test_parse_expression_statement() {
    let expr = single_expression("foobar;");
    assert_identifier(&expr, "foobar");
}

#[test]
fn test_optional_terminator() {
    let expr = single_expression("5");
    assert_integer(&expr, 5);

    let program = parse_ok("let x = 1\nreturn x");
    assert_eq!(program.statements.len(), 2);
    assert!(matches!(program.statements[0], Statement::Let(_)));
    assert!(matches!(program.statements[1], Statement::Return(_)));
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_ok("").is_empty());
    assert!(parse_ok("  \n\t ").is_empty());
    assert_eq!(parse_ok("").literal(), "");
}

#[test]
fn test_parse_prefix_expressions() {
    let expr = single_expression("!5;");
    let Expression::Prefix(prefix) = &expr else {
        panic!("expected prefix expression, got {expr:?}");
    };
    assert_eq!(prefix.operator, "!");
    assert_eq!(prefix.literal(), "!");
    assert_integer(&prefix.right, 5);

    let expr = single_expression("-15;");
    let Expression::Prefix(prefix) = &expr else {
        panic!("expected prefix expression, got {expr:?}");
    };
    assert_eq!(prefix.operator, "-");
    assert_integer(&prefix.right, 15);
}

#[test]
fn test_parse_infix_expressions() {
    let cases = [
        ("5 + 5;", "+"),
        ("5 - 5;", "-"),
        ("5 * 5;", "*"),
        ("5 / 5;", "/"),
        ("5 > 5;", ">"),
        ("5 < 5;", "<"),
        ("5 == 5;", "=="),
        ("5 != 5;", "!="),
    ];

    for (source, operator) in cases {
        let expr = single_expression(source);
        let Expression::Infix(infix) = &expr else {
            panic!("expected infix expression for {source:?}, got {expr:?}");
        };
        assert_eq!(infix.operator, operator);
        assert_integer(&infix.left, 5);
        assert_integer(&infix.right, 5);
    }
}

#[test]
fn test_prefix_binds_tighter_than_product() {
    let expr = single_expression("-a * b");

    let Expression::Infix(infix) = &expr else {
        panic!("expected infix expression, got {expr:?}");
    };
    assert_eq!(infix.operator, "*");
    let Expression::Prefix(prefix) = infix.left.as_ref() else {
        panic!("expected prefix on the left, got {:?}", infix.left);
    };
    assert_eq!(prefix.operator, "-");
    assert_identifier(&prefix.right, "a");
    assert_identifier(&infix.right, "b");
}

#[test]
fn test_sum_is_left_associative() {
    let expr = single_expression("a + b + c");

    let Expression::Infix(outer) = &expr else {
        panic!("expected infix expression, got {expr:?}");
    };
    assert_eq!(outer.operator, "+");
    assert_identifier(&outer.right, "c");

    let Expression::Infix(inner) = outer.left.as_ref() else {
        panic!("expected nested infix on the left, got {:?}", outer.left);
    };
    assert_eq!(inner.operator, "+");
    assert_identifier(&inner.left, "a");
    assert_identifier(&inner.right, "b");
}

#[test]
fn test_product_binds_tighter_than_sum() {
    let expr = single_expression("a + b * c");

    let Expression::Infix(outer) = &expr else {
        panic!("expected infix expression, got {expr:?}");
    };
    assert_eq!(outer.operator, "+");
    assert_identifier(&outer.left, "a");

    let Expression::Infix(inner) = outer.right.as_ref() else {
        panic!("expected nested infix on the right, got {:?}", outer.right);
    };
    assert_eq!(inner.operator, "*");
    assert_identifier(&inner.left, "b");
    assert_identifier(&inner.right, "c");
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("-1 + 2", "((-1) + 2)"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("1 - 2 - 3", "((1 - 2) - 3)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("a == b == c", "((a == b) == c)"),
    ];

    for (source, expected) in cases {
        assert_eq!(parse_ok(source).to_string(), expected, "{source:?}");
    }
}

#[test]
fn test_expression_literal_is_first_token() {
    let expr = single_expression("a + b * c");
    assert_eq!(expr.literal(), "a");

    let expr = single_expression("-x - y");
    assert_eq!(expr.literal(), "-");

    let expr = single_expression("10 / 2 * 3");
    assert_eq!(expr.literal(), "10");
    assert_eq!(expr.token().offset, 0);
}

#[test]
fn test_statements_without_separators() {
    let program = parse_ok("a b");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0].literal(), "a");
    assert_eq!(program.statements[1].literal(), "b");
}

#[test]
fn test_let_missing_assign_fails() {
    let error = parse("let x 5;").unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Assign,
            received: TokenKind::Int,
        }
    );
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 7);
    assert_eq!(error.get_position().offset, 6);
}

#[test]
fn test_let_missing_identifier_fails() {
    assert_eq!(
        parse_err("let = 5;"),
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Ident,
            received: TokenKind::Assign,
        }
    );
    assert_eq!(
        parse_err("let 5 = 5;"),
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Ident,
            received: TokenKind::Int,
        }
    );
    assert_eq!(
        parse_err("let"),
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Ident,
            received: TokenKind::EOF,
        }
    );
}

#[test]
fn test_missing_expression_fails() {
    assert_eq!(
        parse_err("let x = ;"),
        ErrorImpl::NoPrefixParseFunction {
            kind: TokenKind::Semicolon
        }
    );
    assert_eq!(
        parse_err("return;"),
        ErrorImpl::NoPrefixParseFunction {
            kind: TokenKind::Semicolon
        }
    );
    assert_eq!(
        parse_err("1 +"),
        ErrorImpl::NoPrefixParseFunction {
            kind: TokenKind::EOF
        }
    );
}

#[test]
fn test_unsupported_tokens_fail() {
    assert_eq!(
        parse_err("@"),
        ErrorImpl::NoPrefixParseFunction {
            kind: TokenKind::Illegal
        }
    );
    assert_eq!(
        parse_err("if x"),
        ErrorImpl::NoPrefixParseFunction { kind: TokenKind::If }
    );
    assert_eq!(
        parse_err("let b = true;"),
        ErrorImpl::NoPrefixParseFunction {
            kind: TokenKind::True
        }
    );
    assert_eq!(
        parse_err("(1)"),
        ErrorImpl::NoPrefixParseFunction {
            kind: TokenKind::LParen
        }
    );
}

#[test]
fn test_integer_limits() {
    assert_integer(&single_expression("9223372036854775807"), i64::MAX);

    let error = parse("let big = 9223372036854775808;").unwrap_err();
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::IntegerParseError {
            literal: "9223372036854775808".to_string()
        }
    );
    assert_eq!(error.get_position().column, 11);
}

#[test]
fn test_error_position_on_later_line() {
    let error = parse_named("let a = 1;\nlet b 2;", Some("main.mk".to_string())).unwrap_err();

    let position = error.get_position();
    assert_eq!(position.line, 2);
    assert_eq!(position.column, 7);
    assert_eq!(position.offset, 17);
    assert_eq!(position.file.as_str(), "main.mk");
    assert_eq!(
        error.to_string(),
        "line 2, col 7: expected ASSIGN, got INT instead"
    );
}

#[test]
fn test_first_error_aborts() {
    let error = parse("let a = 1; let 2; let c = @;").unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Ident,
            received: TokenKind::Int,
        }
    );
}

#[test]
fn test_parser_window() {
    let mut parser = Parser::new(Lexer::new("let x = 5;", None));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Ident);

    parser.advance();
    assert_eq!(parser.current_token().literal, "x");
    assert_eq!(parser.peek_token_kind(), TokenKind::Assign);
    assert_eq!(parser.peek_token().literal, "=");
    assert_eq!(parser.peek_token().offset, 6);

    assert!(parser.expect_peek(TokenKind::Assign).is_ok());
    assert_eq!(parser.current_token_kind(), TokenKind::Assign);
    assert!(parser.expect_peek(TokenKind::Ident).is_err());
    assert_eq!(parser.current_token_kind(), TokenKind::Assign);
}

#[test]
fn test_binding_power_order() {
    assert!(BindingPower::Lowest < BindingPower::Equals);
    assert!(BindingPower::Equals < BindingPower::LessGreater);
    assert!(BindingPower::LessGreater < BindingPower::Sum);
    assert!(BindingPower::Sum < BindingPower::Product);
    assert!(BindingPower::Product < BindingPower::Prefix);
    assert!(BindingPower::Prefix < BindingPower::Call);

    let parser = Parser::new(Lexer::new("", None));
    assert_eq!(
        parser.get_bp_lookup().get(&TokenKind::Minus),
        Some(&BindingPower::Sum)
    );
    assert_eq!(parser.get_bp_lookup().get(&TokenKind::Semicolon), None);
}
