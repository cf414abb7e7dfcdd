//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Lazy, one-token-at-a-time scanning
//! - Recognition of keywords, identifiers, integer and string literals
//! - One- and two-character operators
//! - Line and offset tracking for error reporting

pub mod lexer;
pub mod tokens;
