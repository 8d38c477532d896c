use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Span;

lazy_static! {
    /// The closed keyword set. Some entries have no grammar production yet.
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        for keyword in [
            "if", "else", "while", "return", "for", "function", "number", "word", "boolean",
            "true", "false", "null", "const", "break", "continue", "main", "print", "input",
            "or", "and", "not",
        ] {
            set.insert(keyword);
        }
        set
    };
}

/// Keywords that open a variable declaration.
pub const TYPE_KEYWORDS: [&str; 3] = ["number", "word", "boolean"];

/// Keywords that belong to the expression sublanguage.
pub const EXPRESSION_KEYWORDS: [&str; 5] = ["true", "false", "not", "and", "or"];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    String,
    Operator,
    Punctuation,
    Comment,
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: \"{}\"", self.kind, self.lexeme)
    }
}

impl Token {
    /// True when the token has the given kind and exact text.
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }

    pub fn is_punctuation(&self, lexeme: &str) -> bool {
        self.is(TokenKind::Punctuation, lexeme)
    }

    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&self.lexeme.as_str())
    }

    /// Keywords other than `true`/`false`/`not`/`and`/`or` end an expression.
    pub fn is_expression_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && EXPRESSION_KEYWORDS.contains(&self.lexeme.as_str())
    }
}
