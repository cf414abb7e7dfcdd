use crate::{
    ast::{
        ast::Statement,
        expressions::Identifier,
        statements::{ExpressionStatement, LetStatement, ReturnStatement},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    if let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start_token = parser.current_token().clone();

    parser.expect_peek(TokenKind::Ident)?;
    let name_token = parser.current_token().clone();
    let name = Identifier {
        name: name_token.literal.clone(),
        token: name_token,
    };

    parser.expect_peek(TokenKind::Assign)?;
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;

    // The terminator is optional so REPL one-liners parse
    parser.advance_if_peek(TokenKind::Semicolon);

    Ok(Statement::Let(LetStatement {
        token: start_token,
        name,
        value,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start_token = parser.current_token().clone();
    parser.advance();

    let value = parse_expr(parser, BindingPower::Lowest)?;

    parser.advance_if_peek(TokenKind::Semicolon);

    Ok(Statement::Return(ReturnStatement {
        token: start_token,
        value,
    }))
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Statement, Error> {
    let start_token = parser.current_token().clone();

    let value = parse_expr(parser, BindingPower::Lowest)?;

    parser.advance_if_peek(TokenKind::Semicolon);

    Ok(Statement::Expression(ExpressionStatement {
        token: start_token,
        value,
    }))
}
