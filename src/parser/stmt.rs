use log::trace;

use crate::{
    ast::statements::{
        AssignmentStmt, BlockStmt, ExpressionStmt, ForStmt, IfStmt, Stmt, VarDeclStmt, WhileStmt,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::StatementParser;

/// Parses one statement, dispatching on the leading keyword or punctuation.
pub fn parse_stmt(parser: &mut StatementParser<'_>) -> Result<Stmt, Error> {
    let handler = parser
        .current_token()
        .filter(|token| matches!(token.kind, TokenKind::Keyword | TokenKind::Punctuation))
        .and_then(|token| parser.get_stmt_lookup().get(token.lexeme.as_str()).copied());

    if let Some(handler) = handler {
        parser.enter()?;
        let stmt = handler(parser)?;
        parser.leave();
        return Ok(stmt);
    }

    parse_assignment_or_expression_stmt(parser)
}

pub fn parse_var_decl_stmt(parser: &mut StatementParser<'_>) -> Result<Stmt, Error> {
    let type_name = parser.consume(TokenKind::Keyword, "Expected type keyword")?;
    let identifier = parser.consume(TokenKind::Identifier, "Expected variable name")?;

    let initializer = if parser.match_lexeme("=") {
        Some(parser.parse_expression()?)
    } else {
        None
    };

    parser.expect(";", "Expected ';' after variable declaration")?;

    trace!("variable declaration: {}", identifier.lexeme);
    Ok(Stmt::VarDecl(VarDeclStmt {
        type_name: type_name.lexeme.clone(),
        identifier: identifier.lexeme.clone(),
        initializer,
    }))
}

/// `name = value;` when an identifier is followed by `=`, otherwise a bare
/// expression statement.
pub fn parse_assignment_or_expression_stmt(parser: &mut StatementParser<'_>) -> Result<Stmt, Error> {
    let is_assignment = matches!(
        (parser.peek_nth(0), parser.peek_nth(1)),
        (Some(name), Some(operator))
            if name.kind == TokenKind::Identifier && operator.is(TokenKind::Operator, "=")
    );

    if is_assignment {
        let variable = parser.consume(TokenKind::Identifier, "Expected variable name")?;
        parser.expect("=", "Expected '=' in assignment")?;
        let value = parser.parse_expression()?;
        parser.expect(";", "Expected ';' after assignment")?;

        return Ok(Stmt::Assignment(AssignmentStmt {
            variable: variable.lexeme.clone(),
            value,
        }));
    }

    let expression = parser.parse_expression()?;
    parser.expect(";", "Expected ';' after expression")?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

pub fn parse_if_stmt(parser: &mut StatementParser<'_>) -> Result<Stmt, Error> {
    parser.expect("if", "Expected 'if'")?;
    parser.expect("(", "Expected '(' after 'if'")?;
    let condition = parser.parse_expression()?;
    parser.expect(")", "Expected ')' after if condition")?;

    let then_body = Box::new(parse_stmt(parser)?);

    // Nearest `if` takes the `else`
    let else_body = if parser.match_lexeme("else") {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
    }))
}

pub fn parse_while_stmt(parser: &mut StatementParser<'_>) -> Result<Stmt, Error> {
    parser.expect("while", "Expected 'while'")?;
    parser.expect("(", "Expected '(' after 'while'")?;
    let condition = parser.parse_expression()?;
    parser.expect(")", "Expected ')' after while condition")?;

    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::While(WhileStmt { condition, body }))
}

pub fn parse_for_stmt(parser: &mut StatementParser<'_>) -> Result<Stmt, Error> {
    parser.expect("for", "Expected 'for'")?;
    parser.expect("(", "Expected '(' after 'for'")?;

    let initializer = if parser.match_lexeme(";") {
        None
    } else if parser.current_token().is_some_and(|token| token.is_type_keyword()) {
        Some(Box::new(parse_var_decl_stmt(parser)?))
    } else {
        Some(Box::new(parse_assignment_or_expression_stmt(parser)?))
    };

    let condition = if parser.check(";") {
        None
    } else {
        Some(parser.parse_expression()?)
    };
    parser.expect(";", "Expected ';' after for condition")?;

    let increment = if parser.check(")") {
        None
    } else {
        Some(parser.parse_expression()?)
    };
    parser.expect(")", "Expected ')' after for clauses")?;

    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::For(ForStmt {
        initializer,
        condition,
        increment,
        body,
    }))
}

pub fn parse_block_stmt(parser: &mut StatementParser<'_>) -> Result<Stmt, Error> {
    parser.expect("{", "Expected '{'")?;

    let mut body = vec![];
    while parser
        .current_token()
        .is_some_and(|token| !token.is_punctuation("}"))
    {
        body.push(parse_stmt(parser)?);
    }

    parser.expect("}", "Expected '}' after block")?;

    Ok(Stmt::Block(BlockStmt { body }))
}
