use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::statements::Stmt,
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{parser::StatementParser, stmt::*};

/// Binding strength of a binary operator tier, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum BindingPower {
    LogicalOr,
    LogicalAnd,
    Equality,
    Comparison,
    Additive,
    Multiplicative,
    Unary,
}

impl BindingPower {
    /// The next tier that binds tighter, or `None` below the binary tiers.
    pub fn tighter(self) -> Option<BindingPower> {
        match self {
            BindingPower::LogicalOr => Some(BindingPower::LogicalAnd),
            BindingPower::LogicalAnd => Some(BindingPower::Equality),
            BindingPower::Equality => Some(BindingPower::Comparison),
            BindingPower::Comparison => Some(BindingPower::Additive),
            BindingPower::Additive => Some(BindingPower::Multiplicative),
            BindingPower::Multiplicative => Some(BindingPower::Unary),
            BindingPower::Unary => None,
        }
    }
}

lazy_static! {
    pub static ref BP_LOOKUP: HashMap<&'static str, BindingPower> = {
        let mut map = HashMap::new();
        // Logical
        map.insert("or", BindingPower::LogicalOr);
        map.insert("||", BindingPower::LogicalOr);
        map.insert("and", BindingPower::LogicalAnd);
        map.insert("&&", BindingPower::LogicalAnd);

        // Equality and relational
        map.insert("==", BindingPower::Equality);
        map.insert("!=", BindingPower::Equality);
        map.insert(">", BindingPower::Comparison);
        map.insert(">=", BindingPower::Comparison);
        map.insert("<", BindingPower::Comparison);
        map.insert("<=", BindingPower::Comparison);

        // Additive and multiplicative
        map.insert("+", BindingPower::Additive);
        map.insert("-", BindingPower::Additive);
        map.insert("*", BindingPower::Multiplicative);
        map.insert("/", BindingPower::Multiplicative);
        map.insert("%", BindingPower::Multiplicative);
        map
    };
}

/// Binding power of `token` when it is a binary operator.
pub fn binding_power(token: &Token) -> Option<BindingPower> {
    match token.kind {
        TokenKind::Operator | TokenKind::Keyword => BP_LOOKUP.get(token.lexeme.as_str()).copied(),
        _ => None,
    }
}

pub type StmtHandler = fn(&mut StatementParser<'_>) -> Result<Stmt, Error>;

pub fn create_token_lookups(parser: &mut StatementParser<'_>) {
    // Declarations
    parser.stmt("number", parse_var_decl_stmt);
    parser.stmt("word", parse_var_decl_stmt);
    parser.stmt("boolean", parse_var_decl_stmt);

    // Control flow
    parser.stmt("if", parse_if_stmt);
    parser.stmt("while", parse_while_stmt);
    parser.stmt("for", parse_for_stmt);

    parser.stmt("{", parse_block_stmt);
}

// Lookup table inside the statement parser, so handlers stay plain functions
pub type StmtLookup = HashMap<&'static str, StmtHandler>;
