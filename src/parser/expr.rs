use crate::{
    ast::{
        ast::Expression,
        expressions::{Identifier, InfixExpression, IntegerLiteral, PrefixExpression},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses one expression starting at the current token.
///
/// Leaves the parser on the last token of the expression. Infix operators
/// are only absorbed while they bind tighter than `bp`, which makes chains
/// of equal precedence left-associative.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expression, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParseFunction { kind: token_kind },
            parser.get_position(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than bp, keep extending lhs
    while parser.peek_token_kind() != TokenKind::Semicolon && parser.peek_precedence() > bp {
        let Some(led_fn) = parser.get_led_lookup().get(&parser.peek_token_kind()).copied() else {
            return Ok(left);
        };

        parser.advance();
        let operator_bp = parser.current_precedence();
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.current_token().clone();

    Ok(Expression::Identifier(Identifier {
        name: token.literal.clone(),
        token,
    }))
}

pub fn parse_integer_literal(parser: &mut Parser) -> Result<Expression, Error> {
    let token = parser.current_token().clone();

    let Ok(value) = token.literal.parse::<i64>() else {
        return Err(Error::new(
            ErrorImpl::IntegerParseError {
                literal: token.literal,
            },
            parser.get_position(),
        ));
    };

    Ok(Expression::IntegerLiteral(IntegerLiteral { token, value }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expression, Error> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expression::Prefix(PrefixExpression {
        operator: operator_token.literal.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr(
    parser: &mut Parser,
    left: Expression,
    bp: BindingPower,
) -> Result<Expression, Error> {
    let operator = parser.current_token().literal.clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(Expression::Infix(InfixExpression {
        token: left.token().clone(),
        operator,
        left: Box::new(left),
        right: Box::new(right),
    }))
}
