//! Lexical analysis.
//!
//! Converts source text into an ordered stream of `(kind, lexeme)` tokens
//! using a table of anchored regex rules tried in priority order:
//!
//! - Identifiers and keywords (closed keyword set)
//! - Numbers, strings, line and block comments
//! - Two-character operators before single-character operators
//! - Punctuation
//!
//! Comments are emitted as tokens; `strip_comments` removes them before the
//! token stream reaches a parser.

pub mod lexer;
pub mod tokens;
