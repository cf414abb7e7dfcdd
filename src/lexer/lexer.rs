use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

lazy_static! {
    static ref SYMBOL_PATTERN: Regex = Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}\p{Nd}_]*").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// A pull-based tokenizer over a single source string.
///
/// Every call to [`Lexer::next_token`] scans exactly one lexeme. Once the
/// input is exhausted it keeps returning `EOF` tokens positioned at the end
/// of the source.
#[derive(Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    file: Rc<String>,
    /// Set once the iterator has handed out its `EOF` token
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file: Option<String>) -> Lexer<'src> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            line: 1,
            file: file_name,
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.at() else {
            return MK_TOKEN!(TokenKind::EOF, "", self.line, self.pos);
        };

        let kind = match ch {
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '=' if self.peek_char() == Some('=') => return self.emit(TokenKind::Eq, 2),
            '=' => TokenKind::Assign,
            '!' if self.peek_char() == Some('=') => return self.emit(TokenKind::NotEq, 2),
            '!' => TokenKind::Bang,
            '"' => return self.read_string(),
            c if c.is_alphabetic() || c == '_' => return self.read_symbol(),
            c if c.is_ascii_digit() => return self.read_number(),
            _ => TokenKind::Illegal,
        };

        self.emit(kind, ch.len_utf8())
    }

    /// Returns the name of the source this lexer reads from.
    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    /// 1-based column of `token`, counted in characters from the start of its line.
    pub fn column_of(&self, token: &Token) -> u32 {
        let offset = (token.offset as usize).min(self.source.len());
        let line_start = self.source[..offset].rfind('\n').map_or(0, |i| i + 1);

        self.source[line_start..offset].chars().count() as u32 + 1
    }

    pub fn position_of(&self, token: &Token) -> Position {
        Position {
            offset: token.offset,
            line: token.line,
            column: self.column_of(token),
            file: Rc::clone(self.file()),
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    fn peek_char(&self) -> Option<char> {
        self.remainder().chars().nth(1)
    }

    fn remainder(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn advance_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.source.len());
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token {
        let literal = &self.remainder()[..len];
        let token = MK_TOKEN!(kind, literal, self.line, self.pos);
        self.advance_n(len);
        token
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.at() {
            if !ch.is_whitespace() {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.advance_n(ch.len_utf8());
        }
    }

    fn read_symbol(&mut self) -> Token {
        let value = SYMBOL_PATTERN
            .find(self.remainder())
            .map_or("", |matched| matched.as_str());

        let kind = RESERVED_LOOKUP
            .get(value)
            .copied()
            .unwrap_or(TokenKind::Ident);

        self.emit(kind, value.len())
    }

    fn read_number(&mut self) -> Token {
        let len = NUMBER_PATTERN
            .find(self.remainder())
            .map_or(0, |matched| matched.end());

        self.emit(TokenKind::Int, len)
    }

    // No escape sequences. An unterminated string runs to the end of input.
    fn read_string(&mut self) -> Token {
        let start = self.pos;
        let line = self.line;
        self.advance_n(1);

        let body = self.remainder();
        let (literal, consumed) = match body.find('"') {
            Some(end) => (&body[..end], end + 1),
            None => (body, body.len()),
        };

        self.line += literal.matches('\n').count() as u32;
        self.advance_n(consumed);

        MK_TOKEN!(TokenKind::String, literal, line, start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token up to and including the first `EOF`, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            self.finished = true;
        }

        Some(token)
    }
}

/// Starts tokenizing `source`. Tokens are produced lazily as the returned
/// lexer is pulled.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source, None)
}
