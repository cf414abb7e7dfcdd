//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$literal` - The token's source text
/// * `$line` - The 1-based line the lexeme starts on
/// * `$offset` - The byte offset the lexeme starts at
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42", 1, 0);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr, $line:expr, $offset:expr) => {
        Token {
            kind: $kind,
            literal: String::from($literal),
            line: $line,
            offset: $offset as u32,
        }
    };
}
