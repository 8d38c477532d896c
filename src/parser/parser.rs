//! Parser state and the statement-level entry points.
//!
//! `TokenCursor` is the shared read head over a borrowed token slice; both
//! the statement parser and the expression parser walk tokens through it.
//! `StatementParser` adds the statement lookup table and the sub-expression
//! extraction that hands slices of its own buffer to an `ExpressionParser`.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    ast::{ast::Program, expressions::Expr, statements::Stmt},
    errors::errors::{Error, ErrorImpl, Found},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    expr::ExpressionParser,
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    stmt::parse_stmt,
};

/// Deepest nesting of parentheses, prefix operators or statements a parser
/// accepts before giving up with an error instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A cursor over a borrowed token slice.
///
/// `offset` is the index of `tokens[0]` in the stream the user handed in, so
/// errors raised by nested parsers still point at the right token.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    offset: usize,
    depth: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token], offset: usize) -> Self {
        TokenCursor {
            tokens,
            pos: 0,
            offset,
            depth: 0,
        }
    }

    /// Enters one nesting level, failing once `MAX_NESTING_DEPTH` is passed.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ErrorImpl::NestedTooDeeply {
                limit: MAX_NESTING_DEPTH,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Looks `n` tokens past the cursor.
    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + n)
    }

    /// Advances to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// True when the current token is the operator, punctuation or keyword
    /// spelled `lexeme`.
    pub fn check(&self, lexeme: &str) -> bool {
        self.current_token().is_some_and(|token| {
            matches!(
                token.kind,
                TokenKind::Operator | TokenKind::Punctuation | TokenKind::Keyword
            ) && token.lexeme == lexeme
        })
    }

    pub fn check_kind(&self, kind: TokenKind) -> bool {
        self.current_token().is_some_and(|token| token.kind == kind)
    }

    /// Consumes the current token if it is one of `lexemes`.
    pub fn match_any(&mut self, lexemes: &[&str]) -> Option<&'a Token> {
        if lexemes.iter().any(|lexeme| self.check(lexeme)) {
            self.advance()
        } else {
            None
        }
    }

    pub fn match_lexeme(&mut self, lexeme: &str) -> bool {
        self.match_any(&[lexeme]).is_some()
    }

    /// Consumes the current token if its text is `lexeme`, otherwise fails
    /// with `message`.
    pub fn expect(&mut self, lexeme: &str, message: &str) -> Result<&'a Token, Error> {
        match self.match_any(&[lexeme]) {
            Some(token) => Ok(token),
            None => Err(self.expected(message)),
        }
    }

    /// Consumes the current token if it has the given kind, otherwise fails
    /// with `message`.
    pub fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&'a Token, Error> {
        if self.check_kind(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.expected(message))
    }

    pub fn found(&self) -> Found {
        match self.current_token() {
            Some(token) => Found::Token(token.lexeme.clone()),
            None => Found::EndOfInput,
        }
    }

    fn expected(&self, message: &str) -> Error {
        self.error(ErrorImpl::ExpectedToken {
            message: message.to_string(),
            found: self.found(),
        })
    }

    pub fn position(&self) -> Position {
        Position::Token(self.offset + self.pos)
    }

    pub fn error(&self, error_impl: ErrorImpl) -> Error {
        Error::new(error_impl, self.position())
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Borrows `tokens[start..end]` without copying.
    pub fn slice(&self, start: usize, end: usize) -> &'a [Token] {
        &self.tokens[start..end]
    }
}

/// The statement parser.
///
/// Holds a cursor over the token stream and the table that maps leading
/// keywords and punctuation to statement handlers.
pub struct StatementParser<'a> {
    cursor: TokenCursor<'a>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
}

impl<'a> StatementParser<'a> {
    /// Creates a parser over `tokens`, which must already be free of comments.
    pub fn new(tokens: &'a [Token]) -> Self {
        let mut parser = StatementParser {
            cursor: TokenCursor::new(tokens, 0),
            stmt_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    pub fn current_token(&self) -> Option<&'a Token> {
        self.cursor.current_token()
    }

    pub fn peek_nth(&self, n: usize) -> Option<&'a Token> {
        self.cursor.peek_nth(n)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        self.cursor.advance()
    }

    pub fn check(&self, lexeme: &str) -> bool {
        self.cursor.check(lexeme)
    }

    pub fn match_lexeme(&mut self, lexeme: &str) -> bool {
        self.cursor.match_lexeme(lexeme)
    }

    pub fn expect(&mut self, lexeme: &str, message: &str) -> Result<&'a Token, Error> {
        self.cursor.expect(lexeme, message)
    }

    pub fn consume(&mut self, kind: TokenKind, message: &str) -> Result<&'a Token, Error> {
        self.cursor.consume(kind, message)
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    pub fn enter(&mut self) -> Result<(), Error> {
        self.cursor.enter()
    }

    pub fn leave(&mut self) {
        self.cursor.leave()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a leading keyword or punctuation.
    pub fn stmt(&mut self, lexeme: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(lexeme, stmt_fn);
    }

    /// Collects the tokens of an inline expression and parses them with a
    /// fresh `ExpressionParser`.
    ///
    /// Collection stops at the first `;`, `{`, `}` or unmatched `)` outside
    /// parentheses, or at a keyword that is not part of the expression
    /// language.
    pub fn parse_expression(&mut self) -> Result<Expr, Error> {
        let start = self.cursor.pos();
        let mut depth = 0usize;

        while let Some(token) = self.cursor.current_token() {
            if token.is_punctuation("(") {
                depth += 1;
            } else if token.is_punctuation(")") {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }

            if depth == 0 {
                if token.is_punctuation(";") || token.is_punctuation("{") || token.is_punctuation("}") {
                    break;
                }
                if token.kind == TokenKind::Keyword && !token.is_expression_keyword() {
                    break;
                }
            }

            self.cursor.advance();
        }

        let end = self.cursor.pos();
        if start == end {
            return Err(self.cursor.error(ErrorImpl::ExpectedExpression));
        }

        trace!("delegating tokens {}..{} to the expression parser", start, end);
        ExpressionParser::with_offset(self.cursor.slice(start, end), self.cursor.offset() + start)
            .parse()
    }

    /// Parses exactly one statement and requires every token to be consumed.
    pub fn parse(&mut self) -> Result<Stmt, Error> {
        let stmt = parse_stmt(self)?;

        if let Some(token) = self.current_token() {
            return Err(self.cursor.error(ErrorImpl::TrailingTokenAfterStatement {
                token: token.lexeme.clone(),
            }));
        }

        Ok(stmt)
    }

    /// Parses statements until the end of input.
    pub fn parse_statements(&mut self) -> Result<Vec<Stmt>, Error> {
        let mut statements = vec![];

        while !self.is_at_end() {
            statements.push(parse_stmt(self)?);
        }

        debug!("parsed {} statements", statements.len());
        Ok(statements)
    }

    pub fn parse_program(&mut self) -> Result<Program, Error> {
        Ok(Program::new(self.parse_statements()?))
    }
}
