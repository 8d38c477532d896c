use crate::{
    ast::expressions::{Expr, IncrementOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{binding_power, BindingPower},
    parser::TokenCursor,
};

/// Precedence-climbing parser for a single expression.
///
/// Each binary tier in `BindingPower` consumes every operator of its own
/// strength, left-associatively, before returning to the looser tier above.
pub struct ExpressionParser<'a> {
    cursor: TokenCursor<'a>,
}

impl<'a> ExpressionParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        ExpressionParser::with_offset(tokens, 0)
    }

    /// A parser over a slice that starts at index `offset` of a larger stream.
    pub fn with_offset(tokens: &'a [Token], offset: usize) -> Self {
        ExpressionParser {
            cursor: TokenCursor::new(tokens, offset),
        }
    }

    /// Parses one expression and requires the whole slice to be consumed.
    pub fn parse(&mut self) -> Result<Expr, Error> {
        let expr = self.expression()?;

        if let Some(token) = self.cursor.current_token() {
            return Err(self.cursor.error(ErrorImpl::TrailingTokenAfterExpression {
                token: token.lexeme.clone(),
            }));
        }

        Ok(expr)
    }

    pub fn expression(&mut self) -> Result<Expr, Error> {
        self.parse_binary_expr(BindingPower::LogicalOr)
    }

    fn parse_binary_expr(&mut self, bp: BindingPower) -> Result<Expr, Error> {
        let Some(tighter) = bp.tighter() else {
            return self.parse_unary_expr();
        };

        let mut left = self.parse_binary_expr(tighter)?;

        while let Some(operator) = self.cursor.current_token() {
            if binding_power(operator) != Some(bp) {
                break;
            }
            self.cursor.advance();

            let right = self.parse_binary_expr(tighter)?;
            left = Expr::binary(left, &operator.lexeme, right);
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, Error> {
        if let Some(operator) = self.cursor.match_any(&["not", "!", "-", "+"]) {
            self.cursor.enter()?;
            let operand = self.parse_unary_expr()?;
            self.cursor.leave();
            return Ok(Expr::unary(&operator.lexeme, operand));
        }

        if let Some(operator) = self.match_increment() {
            return match self.cursor.current_token() {
                Some(token) if token.kind == TokenKind::Identifier => {
                    self.cursor.advance();
                    Ok(Expr::pre_increment(operator, &token.lexeme))
                }
                _ => Err(self.cursor.error(ErrorImpl::ExpectedIdentifierAfter {
                    operator: operator.to_string(),
                })),
            };
        }

        self.parse_postfix_expr()
    }

    fn parse_postfix_expr(&mut self) -> Result<Expr, Error> {
        let expr = self.parse_primary_expr()?;
        let operator_position = self.cursor.position();

        if let Some(operator) = self.match_increment() {
            return match expr.as_identifier() {
                Some(variable) => Ok(Expr::post_increment(variable, operator)),
                None => Err(Error::new(ErrorImpl::InvalidIncrementTarget, operator_position)),
            };
        }

        Ok(expr)
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, Error> {
        let Some(token) = self.cursor.current_token() else {
            return Err(self.cursor.error(ErrorImpl::UnexpectedEndOfInput));
        };

        let expr = match token.kind {
            TokenKind::Keyword if token.lexeme == "true" => Expr::Boolean(true),
            TokenKind::Keyword if token.lexeme == "false" => Expr::Boolean(false),
            TokenKind::Number => Expr::Number(token.lexeme.clone()),
            TokenKind::Identifier => Expr::Identifier(token.lexeme.clone()),
            TokenKind::String => Expr::String(token.lexeme.clone()),
            TokenKind::Punctuation if token.lexeme == "(" => {
                self.cursor.enter()?;
                self.cursor.advance();
                let expr = self.expression()?;
                self.cursor.leave();
                self.cursor.expect(")", "Expected ')' after expression")?;
                return Ok(expr);
            }
            _ => {
                return Err(self.cursor.error(ErrorImpl::UnexpectedToken {
                    token: token.lexeme.clone(),
                }));
            }
        };

        self.cursor.advance();
        Ok(expr)
    }

    /// Consumes a `++` or `--` operator.
    fn match_increment(&mut self) -> Option<IncrementOp> {
        let operator = self
            .cursor
            .current_token()
            .filter(|token| token.kind == TokenKind::Operator)
            .and_then(|token| IncrementOp::from_lexeme(&token.lexeme))?;
        self.cursor.advance();
        Some(operator)
    }
}
