//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser pulls tokens from the lexer on demand and keeps a two-token
//! window (`current` and `peek`). Expressions are parsed with NUD/LED
//! handlers looked up by token kind.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, mem};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// The main parser structure that maintains parsing state.
///
/// The parser owns the lexer and never buffers more than the current and
/// the peek token.
pub struct Parser<'src> {
    /// Source of tokens, pulled one at a time
    lexer: Lexer<'src>,
    /// The token being parsed
    current_token: Token,
    /// One token of lookahead
    peek_token: Token,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl<'src> Parser<'src> {
    /// Creates a new Parser reading from `lexer`, with every handler
    /// registered.
    pub fn new(mut lexer: Lexer<'src>) -> Self {
        let current_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current_token,
            peek_token,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek_token
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek_token.kind
    }

    /// Shifts the peek token into the current slot and pulls a new peek
    /// token from the lexer.
    pub fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current_token = mem::replace(&mut self.peek_token, next);
    }

    /// Advances if the peek token is of `kind`. Used for optional
    /// terminators.
    pub fn advance_if_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Asserts the kind of the peek token and advances onto it.
    ///
    /// # Returns
    ///
    /// An `UnexpectedToken` error positioned at the peek token if it does
    /// not match.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> Result<(), Error> {
        if self.peek_token_kind() != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    expected: expected_kind,
                    received: self.peek_token_kind(),
                },
                self.lexer.position_of(self.peek_token()),
            ));
        }

        self.advance();
        Ok(())
    }

    /// Binding power of the peek token; tokens without an infix handler
    /// rank lowest.
    pub fn peek_precedence(&self) -> BindingPower {
        self.precedence_of(self.peek_token.kind)
    }

    pub fn current_precedence(&self) -> BindingPower {
        self.precedence_of(self.current_token.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Lowest)
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

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the source position of the current token.
    pub fn get_position(&self) -> Position {
        self.lexer.position_of(&self.current_token)
    }

    /// Parses statements until `EOF`.
    ///
    /// The first error aborts the whole parse; no partial program is
    /// returned.
    pub fn parse_program(&mut self) -> Result<Program, Error> {
        let mut program = Program::default();

        while self.current_token_kind() != TokenKind::EOF {
            let stmt = parse_stmt(self)?;
            program.statements.push(stmt);
            self.advance();
        }

        Ok(program)
    }
}

/// Parses `source` into a Program.
///
/// Errors are reported against the `shell` source name.
pub fn parse(source: &str) -> Result<Program, Error> {
    parse_named(source, None)
}

/// Parses `source` into a Program, naming the source `file` in error
/// positions.
pub fn parse_named(source: &str, file: Option<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(Lexer::new(source, file));
    parser.parse_program()
}
