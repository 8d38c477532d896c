#![allow(clippy::module_inception)]

use log::trace;

use crate::{
    ast::{ast::Program, expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::lexer::{strip_comments, tokenize},
    parser::{expr::ExpressionParser, parser::StatementParser},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Where an error happened.
///
/// Lexical failures point at a byte offset in the source text, parse failures
/// at a token index in the (comment-free) token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Source(usize),
    Token(usize),
}

/// Byte range `[start, end)` of a lexeme in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Tokenizes and parses `source` as a single expression.
pub fn parse_expression(source: &str) -> Result<Expr, Error> {
    let tokens = strip_comments(tokenize(source)?);
    trace!("parsing expression from {} tokens", tokens.len());
    ExpressionParser::new(&tokens).parse()
}

/// Tokenizes and parses `source` as exactly one statement.
pub fn parse_statement(source: &str) -> Result<Stmt, Error> {
    let tokens = strip_comments(tokenize(source)?);
    trace!("parsing statement from {} tokens", tokens.len());
    StatementParser::new(&tokens).parse()
}

/// Tokenizes and parses every statement in `source`.
pub fn parse_program(source: &str) -> Result<Program, Error> {
    let tokens = strip_comments(tokenize(source)?);
    trace!("parsing program from {} tokens", tokens.len());
    StatementParser::new(&tokens).parse_program()
}

/// Returns the 1-based line number, the line text and the column of a byte
/// offset in `source`. Offsets past the end map onto the last line.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let pos = position.min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return (line_number, line.to_string(), line_pos);
        }

        start = end;
        line_number += 1;
    }

    // Position sits at EOF: either an empty source or just after the last char
    match source.split_inclusive('\n').last() {
        Some(line) if !line.ends_with('\n') => (line_number - 1, line.to_string(), line.len()),
        _ => (line_number, String::new(), 0),
    }
}
